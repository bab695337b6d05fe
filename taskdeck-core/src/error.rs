use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("End time must not be before start time")]
    InvalidSchedule,

    #[error("Parent comment {parent_id} not found on task {task_id}")]
    ParentNotFound { parent_id: i64, task_id: i64 },

    #[error("Parent comment {parent_id} belongs to a different task")]
    ParentInOtherTask { parent_id: i64 },

    #[error("Replies cannot be nested more than {max} levels deep")]
    ThreadTooDeep { max: usize },
}
