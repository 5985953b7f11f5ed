use serde::Deserialize;

use crate::store::Todo;

/// Body of `POST /`. Any `id` sent by the client is ignored.
#[derive(Debug, Deserialize)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub done: bool,
}

impl From<NewTodo> for Todo {
    fn from(body: NewTodo) -> Self {
        Todo::new(body.title, body.description, body.done)
    }
}
