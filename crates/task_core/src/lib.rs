pub mod config;
pub mod error;
pub mod model;
pub mod storage;
pub mod store;
pub mod task_api;

pub use error::AppError;
pub use model::{Task, TaskStatus};
pub use store::TaskStore;

#[cfg(test)]
mod tests {
    use crate::error::AppError;
    use crate::model::{Task, TaskStatus};
    use time::macros::datetime;

    #[test]
    fn task_has_required_fields() {
        let task = Task::new(
            "demo",
            "",
            TaskStatus::New,
            datetime!(2025-12-20 00:00:00),
            datetime!(2025-12-20 00:00:00),
        );

        assert_eq!(task.title, "demo");
        assert!(task.description.is_empty());
        assert_eq!(task.status, TaskStatus::New);
        assert_eq!(task.created_date, task.status_changed_date);
    }

    #[test]
    fn app_error_exposes_code() {
        let err = AppError::invalid_input("missing title");
        assert_eq!(err.code(), "invalid_input");
        assert_eq!(err.message(), "missing title");
    }
}
