use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use shared_types::{ActivityFeedEntry, ActivityItem, ActivityResponse};
use std::sync::Arc;
use taskdeck_core::relative_time::format_relative_unix;

use crate::database::activity as activity_db;
use crate::database::Database;
use crate::error::ApiError;
use crate::handlers::projects::{visible_project, visible_projects};
use crate::helpers::auth::current_member;
use crate::helpers::sessions::SessionStore;

const FEED_LIMIT: usize = 100;

fn to_feed(items: Vec<ActivityItem>) -> ActivityResponse {
    let now = Utc::now();
    let activities = items
        .into_iter()
        .map(|item| ActivityFeedEntry {
            when: format_relative_unix(item.created_at, now),
            item,
        })
        .collect();

    ActivityResponse { activities }
}

/// Recent activity across every project the viewer may see
pub async fn list_activity(
    req: HttpRequest,
    db: web::Data<Arc<Database>>,
    sessions: web::Data<Arc<SessionStore>>,
) -> Result<HttpResponse, ApiError> {
    let member = current_member(&req, &sessions, db.async_connection.clone()).await?;
    let visible: Vec<i64> = visible_projects(db.async_connection.clone(), &member)
        .await?
        .iter()
        .map(|p| p.id)
        .collect();

    let items =
        activity_db::list_activity(db.async_connection.clone(), &visible, FEED_LIMIT).await?;

    Ok(HttpResponse::Ok().json(to_feed(items)))
}

pub async fn project_activity(
    req: HttpRequest,
    db: web::Data<Arc<Database>>,
    sessions: web::Data<Arc<SessionStore>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let member = current_member(&req, &sessions, db.async_connection.clone()).await?;
    let project = visible_project(db.async_connection.clone(), &member, path.into_inner()).await?;

    let items =
        activity_db::list_activity(db.async_connection.clone(), &[project.id], FEED_LIMIT).await?;

    Ok(HttpResponse::Ok().json(to_feed(items)))
}
