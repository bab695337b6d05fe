pub mod activity;
pub mod auth;
pub mod comments;
pub mod dashboard;
pub mod members;
pub mod projects;
pub mod tasks;

use actix_web::{web, HttpResponse};
use std::sync::Arc;

use crate::database::Database;
use crate::error::ApiError;

pub async fn health(db: web::Data<Arc<Database>>) -> HttpResponse {
    match db.ping().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "database": "connected"
        })),
        Err(e) => {
            tracing::error!("Health check failed: {:#}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "status": "unhealthy",
                "database": "disconnected"
            }))
        }
    }
}

/// Route table shared by the server and handler tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Malformed bodies and paths answer with the same JSON error shape
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::Validation(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| ApiError::Validation(err.to_string()).into()),
    );

    cfg.route("/health", web::get().to(health))
        .route("/api/members", web::post().to(members::create_member))
        .route("/api/members", web::get().to(members::list_members))
        .route("/api/auth/sessions", web::post().to(auth::sign_in))
        .route("/api/auth/sessions", web::delete().to(auth::sign_out))
        .route("/api/auth/me", web::get().to(auth::me))
        .route("/api/projects", web::get().to(projects::list_projects))
        .route("/api/projects", web::post().to(projects::create_project))
        .route("/api/projects/{id}", web::get().to(projects::get_project))
        .route(
            "/api/projects/{id}/members",
            web::get().to(projects::list_project_members),
        )
        .route(
            "/api/projects/{id}/members",
            web::post().to(projects::add_project_member),
        )
        .route("/api/projects/{id}/tasks", web::get().to(tasks::get_board))
        .route("/api/projects/{id}/tasks", web::post().to(tasks::create_task))
        .route(
            "/api/projects/{id}/activity",
            web::get().to(activity::project_activity),
        )
        .route("/api/tasks/{id}", web::get().to(tasks::get_task))
        .route("/api/tasks/{id}", web::put().to(tasks::update_task))
        .route(
            "/api/tasks/{id}/status",
            web::put().to(tasks::update_task_status),
        )
        .route("/api/tasks/{id}/comments", web::get().to(comments::list_comments))
        .route("/api/tasks/{id}/comments", web::post().to(comments::create_comment))
        .route("/api/activity", web::get().to(activity::list_activity))
        .route(
            "/api/dashboard/summary",
            web::get().to(dashboard::get_summary),
        );
}
