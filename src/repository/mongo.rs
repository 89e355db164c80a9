use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use futures_util::TryStreamExt;
use log::debug;
use mongodb::bson::{doc, to_document, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};

use super::{StorageError, StorageResult, TaskRepository};
use crate::models::{TaskEntity, TaskStatus};

const TASKS_COLLECTION: &str = "tasks";
const COUNTERS_COLLECTION: &str = "counters";

/// Tasks live in the `tasks` collection keyed by an integer `_id`. Ids are
/// drawn from a per-collection sequence document in `counters`.
#[derive(Clone)]
pub struct MongoTaskRepository {
    tasks: Collection<TaskEntity>,
    counters: Collection<Document>,
}

impl MongoTaskRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            tasks: db.collection::<TaskEntity>(TASKS_COLLECTION),
            counters: db.collection::<Document>(COUNTERS_COLLECTION),
        }
    }

    async fn next_id(&self) -> StorageResult<i64> {
        let counter = self
            .counters
            .find_one_and_update(
                doc! { "_id": TASKS_COLLECTION },
                doc! { "$inc": { "seq": 1_i64 } },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or(StorageError::Incomplete("id sequence"))?;

        counter
            .get_i64("seq")
            .map_err(|_| StorageError::Incomplete("id sequence"))
    }

    async fn find_sorted(&self, filter: Document) -> StorageResult<Vec<TaskEntity>> {
        debug!("Querying tasks with filter {}", filter);
        let cursor = self.tasks.find(filter).sort(doc! { "_id": 1 }).await?;
        Ok(cursor.try_collect::<Vec<_>>().await?)
    }
}

#[async_trait]
impl TaskRepository for MongoTaskRepository {
    async fn save(&self, mut entity: TaskEntity) -> StorageResult<TaskEntity> {
        let now = Utc::now();
        entity.updated_at = Some(now);

        match entity.id {
            Some(id) => {
                // single round trip; the stored created_at comes back untouched
                let stored = self
                    .tasks
                    .find_one_and_update(doc! { "_id": id }, doc! { "$set": update_fields(&entity)? })
                    .return_document(ReturnDocument::After)
                    .await?;
                entity = stored.ok_or(StorageError::Missing(id))?;
            }
            None => {
                entity.id = Some(self.next_id().await?);
                entity.created_at = Some(now);
                self.tasks.insert_one(&entity).await?;
            }
        }
        Ok(entity)
    }

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<TaskEntity>> {
        Ok(self.tasks.find_one(doc! { "_id": id }).await?)
    }

    async fn find_all(&self) -> StorageResult<Vec<TaskEntity>> {
        self.find_sorted(doc! {}).await
    }

    async fn find_all_by_due_date(&self, due_date: NaiveDate) -> StorageResult<Vec<TaskEntity>> {
        // due_date is stored in its ISO form, so string equality is date equality
        self.find_sorted(doc! { "due_date": due_date.to_string() }).await
    }

    async fn find_all_by_status(&self, status: TaskStatus) -> StorageResult<Vec<TaskEntity>> {
        self.find_sorted(doc! { "status": status.as_str() }).await
    }

    async fn delete_by_id(&self, id: i64) -> StorageResult<()> {
        let res = self.tasks.delete_one(doc! { "_id": id }).await?;
        ensure_deleted(id, res.deleted_count)
    }
}

/// Fields written on re-save. The key and the creation time are never rewritten.
fn update_fields(entity: &TaskEntity) -> StorageResult<Document> {
    let mut fields = to_document(entity)?;
    fields.remove("_id");
    fields.remove("created_at");
    Ok(fields)
}

fn ensure_deleted(id: i64, deleted_count: u64) -> StorageResult<()> {
    if deleted_count == 0 {
        return Err(StorageError::Missing(id));
    }
    Ok(())
}
