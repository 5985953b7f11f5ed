use std::sync::Arc;

use crate::store::TodoStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
}

impl AppState {
    pub fn new<S>(store: S) -> Self
    where
        S: TodoStore + 'static,
    {
        Self {
            store: Arc::new(store),
        }
    }
}
