use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Todo {
    /// Assigned by the store on first save; `None` means never persisted.
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub done: bool,
}

impl Todo {
    pub fn new(title: impl Into<String>, description: impl Into<String>, done: bool) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: description.into(),
            done,
        }
    }
}
