use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ts_rs::TS;

use crate::member::MemberSummary;
use crate::ParseEnumError;

/// Kind of state change recorded in the activity log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    TaskCreated,
    TaskUpdated,
    CommentAdded,
    StatusChanged,
    ProjectCreated,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::TaskCreated => "task_created",
            ActionType::TaskUpdated => "task_updated",
            ActionType::CommentAdded => "comment_added",
            ActionType::StatusChanged => "status_changed",
            ActionType::ProjectCreated => "project_created",
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "task_created" => Ok(ActionType::TaskCreated),
            "task_updated" => Ok(ActionType::TaskUpdated),
            "comment_added" => Ok(ActionType::CommentAdded),
            "status_changed" => Ok(ActionType::StatusChanged),
            "project_created" => Ok(ActionType::ProjectCreated),
            other => Err(ParseEnumError::new("action type", other)),
        }
    }
}

/// Immutable record of a state-changing action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ActivityItem {
    pub id: i64,
    pub action_type: ActionType,
    pub performed_by: MemberSummary,
    pub project_id: i64,
    pub project_name: String,
    pub task_id: Option<i64>,
    pub task_name: Option<String>,
    pub description: String,
    pub created_at: i64,
}

/// Activity item with a label such as "3h ago"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ActivityFeedEntry {
    #[serde(flatten)]
    pub item: ActivityItem,
    pub when: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ActivityResponse {
    pub activities: Vec<ActivityFeedEntry>,
}
