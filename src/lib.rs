//! Task tracker REST backend: actix-web handlers over a task service and a
//! pluggable task repository (MongoDB or in-memory).

pub mod app_state;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod service;
pub mod task;
pub mod task_db;

pub use app_state::AppState;
pub use config::Config;
pub use error::{TaskError, TaskResult};
pub use service::TaskService;
