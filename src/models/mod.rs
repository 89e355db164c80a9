mod task;

pub use task::{
    CreateTaskRequest, DueDateQuery, ParseTaskStatusError, ResultResponse, Task, TaskEntity,
    TaskStatus, TaskStatusRequest, UpdateTaskRequest,
};
