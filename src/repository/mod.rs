//! Persistence port for tasks, plus the MongoDB and in-memory adapters.

mod memory;
mod mongo;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{TaskEntity, TaskStatus};

pub use memory::InMemoryTaskRepository;
pub use mongo::MongoTaskRepository;

pub type StorageResult<T> = Result<T, StorageError>;

/// Task persistence contract. Implementations own id and timestamp assignment.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Inserts the entity when it has no id yet, otherwise replaces the stored
    /// row. Sets `created_at` on insert and `updated_at` on every save.
    async fn save(&self, entity: TaskEntity) -> StorageResult<TaskEntity>;

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<TaskEntity>>;

    /// All rows, ascending by id.
    async fn find_all(&self) -> StorageResult<Vec<TaskEntity>>;

    async fn find_all_by_due_date(&self, due_date: NaiveDate) -> StorageResult<Vec<TaskEntity>>;

    async fn find_all_by_status(&self, status: TaskStatus) -> StorageResult<Vec<TaskEntity>>;

    /// Fails with [`StorageError::Missing`] when nothing was stored under `id`.
    async fn delete_by_id(&self, id: i64) -> StorageResult<()>;
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("could not encode task document: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),

    #[error("no task stored under id {0}")]
    Missing(i64),

    #[error("stored task is missing its {0}")]
    Incomplete(&'static str),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
