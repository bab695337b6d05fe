use shared_types::{DashboardSummary, Project, ProjectMembership, TaskStatus, Visibility};

/// Project columns as stored, before any counts are derived
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub visibility: Visibility,
    pub created_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Build the project shape shown on cards from a stored row and the rows
/// related to it.
pub fn aggregate_project(
    row: ProjectRow,
    memberships: &[ProjectMembership],
    task_statuses: &[TaskStatus],
) -> Project {
    let completed_tasks = task_statuses
        .iter()
        .filter(|status| **status == TaskStatus::Completed)
        .count();

    Project {
        id: row.id,
        title: row.title,
        description: row.description,
        visibility: row.visibility,
        created_by: row.created_by,
        member_count: memberships.len() as i64,
        task_count: task_statuses.len() as i64,
        completed_tasks: completed_tasks as i64,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

/// Completion percentage in `0.0..=100.0`; a project without tasks is at 0.
pub fn progress(project: &Project) -> f64 {
    if project.task_count <= 0 {
        return 0.0;
    }
    project.completed_tasks as f64 / project.task_count as f64 * 100.0
}

pub fn summarize(projects: &[Project]) -> DashboardSummary {
    projects
        .iter()
        .fold(DashboardSummary::default(), |mut summary, project| {
            summary.total_projects += 1;
            summary.total_tasks += project.task_count;
            summary.completed_tasks += project.completed_tasks;
            summary
        })
}
