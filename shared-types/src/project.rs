use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ts_rs::TS;

use crate::ParseEnumError;

/// Who may see a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Private,
    Team,
    Public,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Team => "team",
            Visibility::Public => "public",
        }
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Visibility::Team
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "private" => Ok(Visibility::Private),
            "team" => Ok(Visibility::Team),
            "public" => Ok(Visibility::Public),
            other => Err(ParseEnumError::new("visibility", other)),
        }
    }
}

/// Project with its member and task counts.
///
/// The counts are derived from membership and task rows on every read and
/// are never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub visibility: Visibility,
    pub created_by: i64,
    pub member_count: i64,
    pub task_count: i64,
    pub completed_tasks: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Request to create a new project
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateProjectRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub visibility: Option<Visibility>,
}

/// Response containing a list of projects
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProjectsResponse {
    pub projects: Vec<Project>,
}

/// Totals shown on the dashboard cards
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardSummary {
    pub total_projects: i64,
    pub total_tasks: i64,
    pub completed_tasks: i64,
}
