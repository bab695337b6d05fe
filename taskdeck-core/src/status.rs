use shared_types::TaskStatus;

/// A single overwrite of a task's status.
///
/// Every status can be reached from every other one in one step; there are
/// no guarded transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub from: TaskStatus,
    pub to: TaskStatus,
}

impl StatusChange {
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }

    /// Text recorded in the activity log for this change
    pub fn description(&self) -> String {
        format!(
            "Changed status from {} to {}",
            self.from.label(),
            self.to.label()
        )
    }
}

pub fn transition(current: TaskStatus, next: TaskStatus) -> StatusChange {
    StatusChange {
        from: current,
        to: next,
    }
}
