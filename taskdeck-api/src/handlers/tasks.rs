use actix_web::{web, HttpRequest, HttpResponse};
use shared_types::{CreateTaskRequest, Member, Task, UpdateTaskRequest, UpdateTaskStatusRequest};
use std::sync::Arc;
use taskdeck_core::group_by_status;
use taskdeck_core::validation::{apply_task_update, validate_task};

use crate::database::members as members_db;
use crate::database::tasks as tasks_db;
use crate::database::{AsyncDbConnection, Database};
use crate::error::ApiError;
use crate::handlers::projects::visible_project;
use crate::helpers::auth::current_member;
use crate::helpers::sessions::SessionStore;

/// Load a task whose project the viewer may see
pub(crate) async fn visible_task(
    conn: AsyncDbConnection,
    viewer: &Member,
    task_id: i64,
) -> Result<Task, ApiError> {
    let task = tasks_db::get_task(conn.clone(), task_id).await?;
    visible_project(conn, viewer, task.project_id)
        .await
        .map_err(|e| match e {
            ApiError::NotFound(_) => ApiError::NotFound("Task".to_string()),
            other => other,
        })?;

    Ok(task)
}

/// Task board of a project, one column per status
pub async fn get_board(
    req: HttpRequest,
    db: web::Data<Arc<Database>>,
    sessions: web::Data<Arc<SessionStore>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let member = current_member(&req, &sessions, db.async_connection.clone()).await?;
    let project = visible_project(db.async_connection.clone(), &member, path.into_inner()).await?;

    let tasks = tasks_db::list_tasks(db.async_connection.clone(), project.id).await?;

    Ok(HttpResponse::Ok().json(group_by_status(tasks)))
}

pub async fn create_task(
    req: HttpRequest,
    db: web::Data<Arc<Database>>,
    sessions: web::Data<Arc<SessionStore>>,
    path: web::Path<i64>,
    request: web::Json<CreateTaskRequest>,
) -> Result<HttpResponse, ApiError> {
    let member = current_member(&req, &sessions, db.async_connection.clone()).await?;
    let project = visible_project(db.async_connection.clone(), &member, path.into_inner()).await?;
    let new_task = validate_task(&request)?;

    let mut assignee_ids = Vec::with_capacity(new_task.assignee_emails.len());
    for email in &new_task.assignee_emails {
        let assignee = members_db::find_member_by_email(db.async_connection.clone(), email)
            .await?
            .ok_or_else(|| ApiError::Validation(format!("No member with email {}", email)))?;
        assignee_ids.push(assignee.id);
    }

    let task = tasks_db::create_task(
        db.async_connection.clone(),
        project.id,
        member.id,
        &new_task,
        &assignee_ids,
    )
    .await?;
    tracing::info!("Created task {} in project {}", task.id, project.id);

    Ok(HttpResponse::Created().json(task))
}

pub async fn get_task(
    req: HttpRequest,
    db: web::Data<Arc<Database>>,
    sessions: web::Data<Arc<SessionStore>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let member = current_member(&req, &sessions, db.async_connection.clone()).await?;
    let task = visible_task(db.async_connection.clone(), &member, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Edit title, description or schedule. Fields left out keep their value.
pub async fn update_task(
    req: HttpRequest,
    db: web::Data<Arc<Database>>,
    sessions: web::Data<Arc<SessionStore>>,
    path: web::Path<i64>,
    request: web::Json<UpdateTaskRequest>,
) -> Result<HttpResponse, ApiError> {
    let member = current_member(&req, &sessions, db.async_connection.clone()).await?;
    let task = visible_task(db.async_connection.clone(), &member, path.into_inner()).await?;
    let details = apply_task_update(&task, &request)?;

    let task =
        tasks_db::update_task_details(db.async_connection.clone(), task.id, member.id, &details)
            .await?;

    Ok(HttpResponse::Ok().json(task))
}

pub async fn update_task_status(
    req: HttpRequest,
    db: web::Data<Arc<Database>>,
    sessions: web::Data<Arc<SessionStore>>,
    path: web::Path<i64>,
    request: web::Json<UpdateTaskStatusRequest>,
) -> Result<HttpResponse, ApiError> {
    let member = current_member(&req, &sessions, db.async_connection.clone()).await?;
    let task = visible_task(db.async_connection.clone(), &member, path.into_inner()).await?;

    let task = tasks_db::update_task_status(
        db.async_connection.clone(),
        task.id,
        member.id,
        request.status,
    )
    .await?;

    Ok(HttpResponse::Ok().json(task))
}
