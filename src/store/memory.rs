use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::RwLock;

use super::{StoreError, StoreResult, Todo, TodoStore};

/// In-process todo store. Ids start at 1 and are never reused.
#[derive(Clone)]
pub struct MemoryTodoStore {
    rows: Arc<RwLock<BTreeMap<i64, Todo>>>,
    next_id: Arc<AtomicI64>,
}

impl Default for MemoryTodoStore {
    fn default() -> Self {
        Self {
            rows: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn save(&self, mut todo: Todo) -> StoreResult<Todo> {
        let mut rows = self.rows.write().await;

        match todo.id {
            Some(id) => {
                let row = rows.get_mut(&id).ok_or(StoreError::NotFound(id))?;
                *row = todo.clone();
            }
            None => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                todo.id = Some(id);
                rows.insert(id, todo.clone());
            }
        }

        Ok(todo)
    }

    fn find_all(&self) -> BoxStream<'_, StoreResult<Todo>> {
        let rows = Arc::clone(&self.rows);

        stream::once(async move { rows.read().await.values().cloned().collect::<Vec<_>>() })
            .flat_map(|todos| stream::iter(todos.into_iter().map(Ok)))
            .boxed()
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Todo>> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        self.rows
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    async fn delete_all(&self) -> StoreResult<u64> {
        let mut rows = self.rows.write().await;
        let removed = rows.len() as u64;
        rows.clear();
        Ok(removed)
    }
}
