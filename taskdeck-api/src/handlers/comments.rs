use actix_web::{web, HttpRequest, HttpResponse};
use shared_types::{CommentsResponse, CreateCommentRequest};
use std::sync::Arc;
use taskdeck_core::build_threads;
use taskdeck_core::validation::validate_comment;

use crate::database::comments as comments_db;
use crate::database::Database;
use crate::error::ApiError;
use crate::handlers::tasks::visible_task;
use crate::helpers::auth::current_member;
use crate::helpers::sessions::SessionStore;

/// Comments of a task nested into reply threads
pub async fn list_comments(
    req: HttpRequest,
    db: web::Data<Arc<Database>>,
    sessions: web::Data<Arc<SessionStore>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let member = current_member(&req, &sessions, db.async_connection.clone()).await?;
    let task = visible_task(db.async_connection.clone(), &member, path.into_inner()).await?;

    let comments = comments_db::list_comments(db.async_connection.clone(), task.id).await?;
    let total = comments.len();

    Ok(HttpResponse::Ok().json(CommentsResponse {
        total,
        threads: build_threads(comments),
    }))
}

pub async fn create_comment(
    req: HttpRequest,
    db: web::Data<Arc<Database>>,
    sessions: web::Data<Arc<SessionStore>>,
    path: web::Path<i64>,
    request: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse, ApiError> {
    let member = current_member(&req, &sessions, db.async_connection.clone()).await?;
    let task = visible_task(db.async_connection.clone(), &member, path.into_inner()).await?;
    let content = validate_comment(&request.content)?;

    let comment = comments_db::create_comment(
        db.async_connection.clone(),
        task.id,
        member.id,
        &content,
        request.parent_comment_id,
    )
    .await?;

    Ok(HttpResponse::Created().json(comment))
}
