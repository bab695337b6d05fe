use shared_types::*;
use std::fs;
use std::path::PathBuf;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate TypeScript definitions for API types
    let mut types = Vec::new();

    // Project types
    types.push(clean_type(Visibility::export_to_string()?));
    types.push(clean_type(Project::export_to_string()?));
    types.push(clean_type(CreateProjectRequest::export_to_string()?));
    types.push(clean_type(ProjectsResponse::export_to_string()?));
    types.push(clean_type(DashboardSummary::export_to_string()?));

    // Task types
    types.push(clean_type(TaskStatus::export_to_string()?));
    types.push(clean_type(Task::export_to_string()?));
    types.push(clean_type(CreateTaskRequest::export_to_string()?));
    types.push(clean_type(UpdateTaskRequest::export_to_string()?));
    types.push(clean_type(UpdateTaskStatusRequest::export_to_string()?));
    types.push(clean_type(TaskBoard::export_to_string()?));

    // Member types
    types.push(clean_type(Role::export_to_string()?));
    types.push(clean_type(Member::export_to_string()?));
    types.push(clean_type(MemberSummary::export_to_string()?));
    types.push(clean_type(ProjectMember::export_to_string()?));
    types.push(clean_type(ProjectMembership::export_to_string()?));
    types.push(clean_type(CreateMemberRequest::export_to_string()?));
    types.push(clean_type(AddProjectMemberRequest::export_to_string()?));
    types.push(clean_type(MembersResponse::export_to_string()?));
    types.push(clean_type(ProjectMembersResponse::export_to_string()?));

    // Comment types
    types.push(clean_type(Comment::export_to_string()?));
    types.push(clean_type(CommentThread::export_to_string()?));
    types.push(clean_type(CreateCommentRequest::export_to_string()?));
    types.push(clean_type(CommentsResponse::export_to_string()?));

    // Activity types
    types.push(clean_type(ActionType::export_to_string()?));
    types.push(clean_type(ActivityItem::export_to_string()?));
    types.push(clean_type(ActivityFeedEntry::export_to_string()?));
    types.push(clean_type(ActivityResponse::export_to_string()?));

    // Session types
    types.push(clean_type(SignInRequest::export_to_string()?));
    types.push(clean_type(SessionResponse::export_to_string()?));

    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("../web/src/api-types"));
    fs::create_dir_all(&output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    // All types land in one file, so cross-type imports are dropped
    let filtered: Vec<&str> = type_def
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .collect();

    let result = filtered.join("\n").trim().to_string();
    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}
