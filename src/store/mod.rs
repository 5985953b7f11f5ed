//! Todo persistence.
//!
//! Every operation is a single round-trip to the backing store. There is no
//! caching, batching or retry here; `save_all` is a loop over `save` and is
//! not atomic.

mod memory;
mod model;
mod postgres;

use async_trait::async_trait;
use futures::stream::BoxStream;

pub use memory::MemoryTodoStore;
pub use model::Todo;
pub use postgres::PgTodoStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Constraint violation or lost connectivity.
    #[error("persistence error: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("todo {0} not found")]
    NotFound(i64),

    #[error("todo has no id, it was never saved")]
    MissingId,
}

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Inserts when `todo.id` is unset, otherwise overwrites the row with that id.
    async fn save(&self, todo: Todo) -> StoreResult<Todo>;

    /// Every persisted todo in store order. Each call runs a fresh query.
    fn find_all(&self) -> BoxStream<'_, StoreResult<Todo>>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Todo>>;

    /// Fails with `NotFound` when no row had this id.
    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;

    /// Returns the number of rows removed.
    async fn delete_all(&self) -> StoreResult<u64>;

    /// Saves in input order and stops at the first error. Todos saved before
    /// the failure stay saved.
    async fn save_all(&self, todos: Vec<Todo>) -> StoreResult<Vec<Todo>> {
        let mut saved = Vec::with_capacity(todos.len());
        for todo in todos {
            saved.push(self.save(todo).await?);
        }
        Ok(saved)
    }

    async fn delete(&self, todo: &Todo) -> StoreResult<()> {
        let id = todo.id.ok_or(StoreError::MissingId)?;
        self.delete_by_id(id).await
    }
}
