use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt, TryStreamExt};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::{StoreError, StoreResult, Todo, TodoStore};

const CREATE_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS todo (
        id BIGSERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        done BOOLEAN NOT NULL DEFAULT FALSE
    )
"#;

/// Todo store over a Postgres `todo` table.
#[derive(Clone)]
pub struct PgTodoStore {
    pool: PgPool,
}

impl PgTodoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self::new(pool))
    }

    /// Creates the `todo` table if it does not exist yet.
    pub async fn init_schema(&self) -> StoreResult<()> {
        sqlx::query(CREATE_TABLE_SQL).execute(&self.pool).await?;
        Ok(())
    }

    async fn insert(&self, todo: Todo) -> StoreResult<Todo> {
        let rec = sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todo (title, description, done)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, done
            "#,
        )
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.done)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = ?rec.id, "inserted todo");
        Ok(rec)
    }

    async fn update(&self, id: i64, todo: Todo) -> StoreResult<Todo> {
        let rec = sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todo
            SET title = $2, description = $3, done = $4
            WHERE id = $1
            RETURNING id, title, description, done
            "#,
        )
        .bind(id)
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.done)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound(id))?;

        tracing::debug!(id, done = rec.done, "updated todo");
        Ok(rec)
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn save(&self, todo: Todo) -> StoreResult<Todo> {
        match todo.id {
            Some(id) => self.update(id, todo).await,
            None => self.insert(todo).await,
        }
    }

    fn find_all(&self) -> BoxStream<'_, StoreResult<Todo>> {
        sqlx::query_as::<_, Todo>("SELECT id, title, description, done FROM todo")
            .fetch(&self.pool)
            .map_err(StoreError::from)
            .boxed()
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Todo>> {
        let rec = sqlx::query_as::<_, Todo>(
            "SELECT id, title, description, done FROM todo WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rec)
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM todo WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }

        tracing::debug!(id, "deleted todo");
        Ok(())
    }

    async fn delete_all(&self) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM todo").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
