use actix_web::{web, HttpRequest, HttpResponse};
use shared_types::{
    AddProjectMemberRequest, CreateProjectRequest, Member, Project, ProjectMembersResponse,
    ProjectsResponse,
};
use std::sync::Arc;
use taskdeck_core::can_view;
use taskdeck_core::validation::{normalize_email, validate_project};

use crate::database::members as members_db;
use crate::database::projects as projects_db;
use crate::database::{AsyncDbConnection, Database};
use crate::error::ApiError;
use crate::helpers::auth::current_member;
use crate::helpers::sessions::SessionStore;

const DEFAULT_PROJECT_ROLE: &str = "Member";

/// Load a project the viewer is allowed to see. Hidden projects read as
/// missing so their existence does not leak.
pub(crate) async fn visible_project(
    conn: AsyncDbConnection,
    viewer: &Member,
    project_id: i64,
) -> Result<Project, ApiError> {
    let project = projects_db::get_project(conn.clone(), project_id).await?;
    let is_member = members_db::is_project_member(conn, project_id, viewer.id).await?;

    if !can_view(&project, viewer, is_member) {
        tracing::debug!("Member {} may not view project {}", viewer.id, project_id);
        return Err(ApiError::NotFound("Project".to_string()));
    }

    Ok(project)
}

/// Every project the viewer may see, with derived counts
pub(crate) async fn visible_projects(
    conn: AsyncDbConnection,
    viewer: &Member,
) -> Result<Vec<Project>, ApiError> {
    let memberships = projects_db::member_project_ids(conn.clone(), viewer.id).await?;
    let projects = projects_db::list_projects(conn).await?;

    Ok(projects
        .into_iter()
        .filter(|p| can_view(p, viewer, memberships.contains(&p.id)))
        .collect())
}

pub async fn list_projects(
    req: HttpRequest,
    db: web::Data<Arc<Database>>,
    sessions: web::Data<Arc<SessionStore>>,
) -> Result<HttpResponse, ApiError> {
    let member = current_member(&req, &sessions, db.async_connection.clone()).await?;
    let projects = visible_projects(db.async_connection.clone(), &member).await?;

    Ok(HttpResponse::Ok().json(ProjectsResponse { projects }))
}

pub async fn create_project(
    req: HttpRequest,
    db: web::Data<Arc<Database>>,
    sessions: web::Data<Arc<SessionStore>>,
    request: web::Json<CreateProjectRequest>,
) -> Result<HttpResponse, ApiError> {
    let member = current_member(&req, &sessions, db.async_connection.clone()).await?;
    let new_project = validate_project(&request)?;

    let project =
        projects_db::create_project(db.async_connection.clone(), &member, &new_project).await?;

    Ok(HttpResponse::Created().json(project))
}

pub async fn get_project(
    req: HttpRequest,
    db: web::Data<Arc<Database>>,
    sessions: web::Data<Arc<SessionStore>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let member = current_member(&req, &sessions, db.async_connection.clone()).await?;
    let project = visible_project(db.async_connection.clone(), &member, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(project))
}

pub async fn list_project_members(
    req: HttpRequest,
    db: web::Data<Arc<Database>>,
    sessions: web::Data<Arc<SessionStore>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let member = current_member(&req, &sessions, db.async_connection.clone()).await?;
    let project = visible_project(db.async_connection.clone(), &member, path.into_inner()).await?;

    let members = members_db::list_project_members(db.async_connection.clone(), project.id).await?;

    Ok(HttpResponse::Ok().json(ProjectMembersResponse { members }))
}

/// Add a registered member to a project by email
pub async fn add_project_member(
    req: HttpRequest,
    db: web::Data<Arc<Database>>,
    sessions: web::Data<Arc<SessionStore>>,
    path: web::Path<i64>,
    request: web::Json<AddProjectMemberRequest>,
) -> Result<HttpResponse, ApiError> {
    let member = current_member(&req, &sessions, db.async_connection.clone()).await?;
    let project = visible_project(db.async_connection.clone(), &member, path.into_inner()).await?;

    let email = normalize_email(&request.email)?;
    let new_member = members_db::find_member_by_email(db.async_connection.clone(), &email)
        .await?
        .ok_or_else(|| ApiError::Validation(format!("No member with email {}", email)))?;

    let role_in_project = match request.role_in_project.trim() {
        "" => DEFAULT_PROJECT_ROLE,
        role => role,
    };

    members_db::add_project_member(
        db.async_connection.clone(),
        project.id,
        new_member.id,
        role_in_project,
    )
    .await?;
    tracing::info!("Added member {} to project {}", new_member.id, project.id);

    let members = members_db::list_project_members(db.async_connection.clone(), project.id).await?;

    Ok(HttpResponse::Created().json(ProjectMembersResponse { members }))
}
