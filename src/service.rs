use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, error};

use crate::error::{TaskError, TaskResult};
use crate::models::{Task, TaskEntity, TaskStatus};
use crate::repository::{StorageError, TaskRepository};

/// Business rules for tasks: merge-on-empty updates, entity mapping and the
/// not-found policy. Cheap to clone; all clones share one repository.
#[derive(Clone)]
pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    pub async fn add(
        &self,
        title: String,
        description: String,
        due_date: NaiveDate,
    ) -> TaskResult<Task> {
        let saved = self
            .repository
            .save(TaskEntity::new(title, description, due_date))
            .await?;
        entity_to_task(saved)
    }

    /// Every task, ascending by id.
    pub async fn get_all(&self) -> TaskResult<Vec<Task>> {
        entities_to_tasks(self.repository.find_all().await?)
    }

    /// `due_date` must be an ISO calendar date (`YYYY-MM-DD`).
    pub async fn get_by_due_date(&self, due_date: &str) -> TaskResult<Vec<Task>> {
        let date = NaiveDate::parse_from_str(due_date, "%Y-%m-%d").map_err(|e| {
            TaskError::InvalidInput(format!("dueDate '{}' is not a calendar date: {}", due_date, e))
        })?;
        debug!("Listing tasks due on {}", date);
        entities_to_tasks(self.repository.find_all_by_due_date(date).await?)
    }

    pub async fn get_all_by_status(&self, status: TaskStatus) -> TaskResult<Vec<Task>> {
        entities_to_tasks(self.repository.find_all_by_status(status).await?)
    }

    pub async fn get_one(&self, id: i64) -> TaskResult<Task> {
        entity_to_task(self.get_by_id(id).await?)
    }

    /// Empty or missing title/description and a missing due date keep the
    /// stored value. Status is left alone.
    pub async fn update(
        &self,
        id: i64,
        title: Option<String>,
        description: Option<String>,
        due_date: Option<NaiveDate>,
    ) -> TaskResult<Task> {
        let mut existing = self.get_by_id(id).await?;

        existing.title = merge_text(existing.title, title);
        existing.description = merge_text(existing.description, description);
        existing.due_date = due_date.unwrap_or(existing.due_date);

        entity_to_task(self.repository.save(existing).await?)
    }

    /// Any status may follow any other.
    pub async fn update_status(&self, id: i64, status: TaskStatus) -> TaskResult<Task> {
        let mut entity = self.get_by_id(id).await?;
        entity.status = status;
        entity_to_task(self.repository.save(entity).await?)
    }

    /// Reports failures, a missing id included, as `false` instead of an error.
    pub async fn delete(&self, id: i64) -> bool {
        match self.repository.delete_by_id(id).await {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to delete task {}: {}", id, e);
                false
            }
        }
    }

    async fn get_by_id(&self, id: i64) -> TaskResult<TaskEntity> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }
}

fn merge_text(current: String, incoming: Option<String>) -> String {
    match incoming {
        Some(value) if !value.is_empty() => value,
        _ => current,
    }
}

fn entity_to_task(entity: TaskEntity) -> TaskResult<Task> {
    Ok(Task {
        id: entity.id.ok_or(StorageError::Incomplete("id"))?,
        title: entity.title,
        description: entity.description,
        status: entity.status,
        due_date: entity.due_date,
        created_at: entity.created_at.ok_or(StorageError::Incomplete("created_at"))?,
        updated_at: entity.updated_at.ok_or(StorageError::Incomplete("updated_at"))?,
    })
}

fn entities_to_tasks(entities: Vec<TaskEntity>) -> TaskResult<Vec<Task>> {
    entities.into_iter().map(entity_to_task).collect()
}
