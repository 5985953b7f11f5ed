use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use todo_service::store::{MemoryTodoStore, Todo, TodoStore};
use todo_service::{app, AppState};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- create ---

#[tokio::test]
async fn create_returns_201_with_assigned_id() {
    let app = app(AppState::new(MemoryTodoStore::new()));
    let resp = app
        .oneshot(json_request(
            "POST",
            "/",
            r#"{"title":"Todo 1","description":"This is the first todo","done":false}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let todo: Todo = body_json(resp).await;
    assert!(todo.id.is_some());
    assert_eq!(todo.title, "Todo 1");
    assert_eq!(todo.description, "This is the first todo");
    assert!(!todo.done);
}

#[tokio::test]
async fn create_persists_through_the_store() {
    let store = MemoryTodoStore::new();
    let app = app(AppState::new(store.clone()));

    let resp = app
        .oneshot(json_request(
            "POST",
            "/",
            r#"{"title":"Todo 3","description":"This is the third todo"}"#,
        ))
        .await
        .unwrap();
    let created: Todo = body_json(resp).await;

    let stored = store.find_by_id(created.id.unwrap()).await.unwrap();
    assert_eq!(stored, Some(created));
}

#[tokio::test]
async fn create_ignores_client_supplied_id() {
    let app = app(AppState::new(MemoryTodoStore::new()));
    let resp = app
        .oneshot(json_request(
            "POST",
            "/",
            r#"{"id":500,"title":"Todo 1","description":"This is the first todo"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let todo: Todo = body_json(resp).await;
    assert_eq!(todo.id, Some(1));
}

#[tokio::test]
async fn create_missing_field_returns_422() {
    let app = app(AppState::new(MemoryTodoStore::new()));
    let resp = app
        .oneshot(json_request("POST", "/", r#"{"title":"No description"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_without_json_content_type_returns_415() {
    let app = app(AppState::new(MemoryTodoStore::new()));
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .body(r#"{"title":"a","description":"b"}"#.to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

// --- list ---

#[tokio::test]
async fn list_empty() {
    let app = app(AppState::new(MemoryTodoStore::new()));
    let resp = app.oneshot(get("/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());
}

#[tokio::test]
async fn list_returns_every_saved_todo() {
    let store = MemoryTodoStore::new();
    store
        .save_all(vec![
            Todo::new("Todo 1", "This is the first todo", false),
            Todo::new("Todo 2", "This is the second todo", true),
        ])
        .await
        .unwrap();

    let app = app(AppState::new(store));
    let resp = app.oneshot(get("/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let mut titles: Vec<String> = body_json::<Vec<Todo>>(resp)
        .await
        .into_iter()
        .map(|t| t.title)
        .collect();
    titles.sort();
    assert_eq!(titles, ["Todo 1", "Todo 2"]);
}

#[tokio::test]
async fn created_todo_shows_up_in_list() {
    let app = app(AppState::new(MemoryTodoStore::new()));

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/",
            r#"{"title":"Todo 4","description":"This is the fourth todo","done":true}"#,
        ))
        .await
        .unwrap();
    let created: Todo = body_json(resp).await;

    let resp = app.oneshot(get("/")).await.unwrap();
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos, vec![created]);
}

// --- routing ---

#[tokio::test]
async fn health_is_ok() {
    let app = app(AppState::new(MemoryTodoStore::new()));
    let resp = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["status"], 200);
}

#[tokio::test]
async fn delete_is_not_exposed() {
    let app = app(AppState::new(MemoryTodoStore::new()));
    let resp = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}
