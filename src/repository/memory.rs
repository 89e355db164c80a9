use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use super::{StorageError, StorageResult, TaskRepository};
use crate::models::{TaskEntity, TaskStatus};

/// Thread-safe in-memory store, used for `TASK_STORAGE=memory` and in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    tasks: BTreeMap<i64, TaskEntity>,
    last_id: i64,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn filtered<F>(&self, keep: F) -> StorageResult<Vec<TaskEntity>>
    where
        F: Fn(&TaskEntity) -> bool,
    {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.tasks.values().filter(|t| keep(t)).cloned().collect())
    }
}

fn poisoned<E: std::fmt::Display>(err: E) -> StorageError {
    StorageError::Unavailable(err.to_string())
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn save(&self, mut entity: TaskEntity) -> StorageResult<TaskEntity> {
        let mut state = self.state.write().map_err(poisoned)?;
        let now = Utc::now();

        match entity.id {
            Some(id) => {
                let stored = state.tasks.get(&id).ok_or(StorageError::Missing(id))?;
                entity.created_at = stored.created_at;
            }
            None => {
                state.last_id += 1;
                entity.id = Some(state.last_id);
                entity.created_at = Some(now);
            }
        }
        entity.updated_at = Some(now);

        let id = entity.id.ok_or(StorageError::Incomplete("id"))?;
        state.tasks.insert(id, entity.clone());
        Ok(entity)
    }

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<TaskEntity>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_all(&self) -> StorageResult<Vec<TaskEntity>> {
        self.filtered(|_| true)
    }

    async fn find_all_by_due_date(&self, due_date: NaiveDate) -> StorageResult<Vec<TaskEntity>> {
        self.filtered(|t| t.due_date == due_date)
    }

    async fn find_all_by_status(&self, status: TaskStatus) -> StorageResult<Vec<TaskEntity>> {
        self.filtered(|t| t.status == status)
    }

    async fn delete_by_id(&self, id: i64) -> StorageResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::Missing(id))
    }
}
