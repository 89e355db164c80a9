// src/task.rs

use actix_web::{web, HttpResponse};
use log::info;

use crate::app_state::AppState;
use crate::error::TaskError;
use crate::models::{
    CreateTaskRequest, DueDateQuery, ResultResponse, TaskStatus, TaskStatusRequest,
    UpdateTaskRequest,
};

/// Mounts the `/tasks` routes. Extractor failures surface as 400 InvalidInput.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tasks")
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                TaskError::InvalidInput(err.to_string()).into()
            }))
            .app_data(web::PathConfig::default().error_handler(|err, _req| {
                TaskError::InvalidInput(err.to_string()).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                TaskError::InvalidInput(err.to_string()).into()
            }))
            .route("", web::post().to(create_task))
            .route("", web::get().to(list_tasks))
            // fixed segments first so "status" is never read as an id
            .route("/status", web::get().to(list_statuses))
            .route("/status/{status}", web::get().to(list_tasks_by_status))
            .route("/{id}", web::get().to(get_task))
            .route("/{id}", web::put().to(update_task))
            .route("/{id}", web::delete().to(delete_task))
            .route("/{id}/status", web::patch().to(update_task_status)),
    );
}

/// POST /tasks
pub async fn create_task(
    data: web::Data<AppState>,
    payload: web::Json<CreateTaskRequest>,
) -> Result<HttpResponse, TaskError> {
    let CreateTaskRequest { title, description, due_date } = payload.into_inner();
    let task = data.tasks.add(title, description, due_date).await?;
    info!("Task created: {}", task.id);
    Ok(HttpResponse::Ok().json(task))
}

/// GET /tasks
/// Lists every task, or only those due on `?dueDate=YYYY-MM-DD`.
pub async fn list_tasks(
    data: web::Data<AppState>,
    query: web::Query<DueDateQuery>,
) -> Result<HttpResponse, TaskError> {
    let tasks = match query.due_date.as_deref() {
        Some(due_date) => data.tasks.get_by_due_date(due_date).await?,
        None => data.tasks.get_all().await?,
    };
    Ok(HttpResponse::Ok().json(tasks))
}

/// GET /tasks/{id}
pub async fn get_task(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, TaskError> {
    let task = data.tasks.get_one(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// GET /tasks/status/{status}
pub async fn list_tasks_by_status(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, TaskError> {
    let status = path
        .parse::<TaskStatus>()
        .map_err(|e| TaskError::InvalidInput(e.to_string()))?;
    let tasks = data.tasks.get_all_by_status(status).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// PUT /tasks/{id}
pub async fn update_task(
    data: web::Data<AppState>,
    path: web::Path<i64>,
    payload: web::Json<UpdateTaskRequest>,
) -> Result<HttpResponse, TaskError> {
    let id = path.into_inner();
    let UpdateTaskRequest { title, description, due_date } = payload.into_inner();
    let task = data.tasks.update(id, title, description, due_date).await?;
    info!("Task updated: {}", id);
    Ok(HttpResponse::Ok().json(task))
}

/// PATCH /tasks/{id}/status
pub async fn update_task_status(
    data: web::Data<AppState>,
    path: web::Path<i64>,
    payload: web::Json<TaskStatusRequest>,
) -> Result<HttpResponse, TaskError> {
    let id = path.into_inner();
    let task = data.tasks.update_status(id, payload.status).await?;
    info!("Task {} moved to {}", id, task.status);
    Ok(HttpResponse::Ok().json(task))
}

/// DELETE /tasks/{id}
/// Always answers 200; the body says whether anything was deleted.
pub async fn delete_task(data: web::Data<AppState>, path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();
    let result = data.tasks.delete(id).await;
    if result {
        info!("Task deleted: {}", id);
    }
    HttpResponse::Ok().json(ResultResponse { result })
}

/// GET /tasks/status
pub async fn list_statuses() -> HttpResponse {
    HttpResponse::Ok().json(TaskStatus::ALL)
}
