use std::sync::Arc;

use crate::repository::TaskRepository;
use crate::service::TaskService;

#[derive(Clone)]
pub struct AppState {
    pub tasks: TaskService,
}

impl AppState {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self {
            tasks: TaskService::new(repository),
        }
    }
}
