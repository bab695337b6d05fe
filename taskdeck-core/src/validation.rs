use shared_types::{
    CreateMemberRequest, CreateProjectRequest, CreateTaskRequest, Role, Task, TaskStatus,
    UpdateTaskRequest, Visibility,
};

use crate::CoreError;

/// Project fields that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub visibility: Visibility,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub assignee_emails: Vec<String>,
}

/// Editable task fields after an update has been merged in
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDetails {
    pub title: String,
    pub description: String,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMember {
    pub name: String,
    pub email: String,
    pub role: Role,
}

fn required(value: &str, field: &'static str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

fn check_schedule(start_time: Option<i64>, end_time: Option<i64>) -> Result<(), CoreError> {
    if let (Some(start), Some(end)) = (start_time, end_time) {
        if end < start {
            return Err(CoreError::InvalidSchedule);
        }
    }
    Ok(())
}

/// Trim and lowercase an email address, rejecting anything without a local
/// part and a domain.
pub fn normalize_email(email: &str) -> Result<String, CoreError> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
        {
            Ok(email)
        }
        _ => Err(CoreError::InvalidEmail(email)),
    }
}

/// Split the comma separated assignee field of the task form
pub fn parse_assignee_emails(raw: &str) -> Result<Vec<String>, CoreError> {
    let mut emails: Vec<String> = Vec::new();
    for part in raw.split(',').filter(|part| !part.trim().is_empty()) {
        let email = normalize_email(part)?;
        if !emails.contains(&email) {
            emails.push(email);
        }
    }
    Ok(emails)
}

pub fn validate_project(request: &CreateProjectRequest) -> Result<NewProject, CoreError> {
    Ok(NewProject {
        title: required(&request.title, "Title")?,
        description: request.description.trim().to_string(),
        visibility: request.visibility.unwrap_or_default(),
    })
}

pub fn validate_task(request: &CreateTaskRequest) -> Result<NewTask, CoreError> {
    let title = required(&request.title, "Title")?;
    check_schedule(request.start_time, request.end_time)?;

    Ok(NewTask {
        title,
        description: request.description.trim().to_string(),
        status: request.status.unwrap_or_default(),
        start_time: request.start_time,
        end_time: request.end_time,
        assignee_emails: parse_assignee_emails(&request.assignee_emails)?,
    })
}

/// Merge an update into a task. Absent fields keep their value and an explicit
/// null schedule field clears it.
pub fn apply_task_update(
    task: &Task,
    request: &UpdateTaskRequest,
) -> Result<TaskDetails, CoreError> {
    let title = match &request.title {
        Some(title) => required(title, "Title")?,
        None => task.title.clone(),
    };
    let details = TaskDetails {
        title,
        description: request
            .description
            .as_deref()
            .map(|d| d.trim().to_string())
            .unwrap_or_else(|| task.description.clone()),
        start_time: request.start_time.unwrap_or(task.start_time),
        end_time: request.end_time.unwrap_or(task.end_time),
    };
    check_schedule(details.start_time, details.end_time)?;

    Ok(details)
}

pub fn validate_comment(content: &str) -> Result<String, CoreError> {
    required(content, "Comment")
}

pub fn validate_member(request: &CreateMemberRequest) -> Result<NewMember, CoreError> {
    Ok(NewMember {
        name: required(&request.name, "Name")?,
        email: normalize_email(&request.email)?,
        role: request.role.unwrap_or_default(),
    })
}
