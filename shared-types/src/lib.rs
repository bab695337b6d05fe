use serde::{Deserialize, Serialize};

pub mod activity;
pub mod comment;
pub mod member;
pub mod project;
pub mod session;
pub mod task;

pub use activity::{ActionType, ActivityFeedEntry, ActivityItem, ActivityResponse};
pub use comment::{Comment, CommentThread, CommentsResponse, CreateCommentRequest};
pub use member::{
    AddProjectMemberRequest, CreateMemberRequest, Member, MemberSummary, MembersResponse,
    ProjectMember, ProjectMembersResponse, ProjectMembership, Role,
};
pub use project::{
    CreateProjectRequest, DashboardSummary, Project, ProjectsResponse, Visibility,
};
pub use session::{SessionResponse, SignInRequest};
pub use task::{
    CreateTaskRequest, Task, TaskBoard, TaskStatus, UpdateTaskRequest, UpdateTaskStatusRequest,
};

/// Error response for API endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A stored or submitted string that names no known enum variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_status_serialization() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");

        let deserialized: TaskStatus = serde_json::from_str("\"not_started\"").unwrap();
        assert_eq!(deserialized, TaskStatus::NotStarted);
    }

    #[test]
    fn test_update_tells_missing_from_null() {
        let update: UpdateTaskRequest =
            serde_json::from_str(r#"{"start_time": null, "end_time": 300}"#).unwrap();
        assert_eq!(update.start_time, Some(None));
        assert_eq!(update.end_time, Some(Some(300)));

        let update: UpdateTaskRequest = serde_json::from_str(r#"{"title": "New"}"#).unwrap();
        assert_eq!(update.start_time, None);
        assert_eq!(update.end_time, None);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let err = "blocked".parse::<TaskStatus>().unwrap_err();
        assert_eq!(err.kind, "task status");
        assert_eq!(err.value, "blocked");

        assert!(serde_json::from_str::<TaskStatus>("\"blocked\"").is_err());
    }

    #[test]
    fn test_enum_strings_round_trip_through_from_str() {
        for status in TaskStatus::ALL {
            assert_eq!(status.as_str().parse::<TaskStatus>().unwrap(), status);
        }
        assert_eq!("team".parse::<Visibility>().unwrap(), Visibility::Team);
        assert_eq!("manager".parse::<Role>().unwrap(), Role::Manager);
        assert_eq!(
            "status_changed".parse::<ActionType>().unwrap(),
            ActionType::StatusChanged
        );
        assert!("owner".parse::<Role>().is_err());
        assert!("secret".parse::<Visibility>().is_err());
        assert!("task_deleted".parse::<ActionType>().is_err());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(TaskStatus::NotStarted.label(), "Not Started");
        assert_eq!(TaskStatus::InProgress.label(), "In Progress");
        assert_eq!(TaskStatus::Completed.label(), "Completed");
    }

    #[test]
    fn test_create_project_request_defaults() {
        let request: CreateProjectRequest = serde_json::from_str(r#"{"title":"Demo"}"#).unwrap();
        assert_eq!(request.title, "Demo");
        assert!(request.description.is_empty());
        assert!(request.visibility.is_none());
    }

    #[test]
    fn test_activity_entry_flattens_item() {
        let entry = ActivityFeedEntry {
            item: ActivityItem {
                id: 1,
                action_type: ActionType::ProjectCreated,
                performed_by: MemberSummary {
                    id: 2,
                    name: "Sarah Wilson".to_string(),
                    email: "sarah@example.com".to_string(),
                },
                project_id: 3,
                project_name: "E-commerce Platform".to_string(),
                task_id: None,
                task_name: None,
                description: "Created project".to_string(),
                created_at: 0,
            },
            when: "Just now".to_string(),
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["action_type"], "project_created");
        assert_eq!(value["project_name"], "E-commerce Platform");
        assert_eq!(value["when"], "Just now");
    }
}
