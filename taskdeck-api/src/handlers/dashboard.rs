use actix_web::{web, HttpRequest, HttpResponse};
use std::sync::Arc;
use taskdeck_core::summarize;

use crate::database::Database;
use crate::error::ApiError;
use crate::handlers::projects::visible_projects;
use crate::helpers::auth::current_member;
use crate::helpers::sessions::SessionStore;

/// Totals shown on the dashboard cards, over visible projects only
pub async fn get_summary(
    req: HttpRequest,
    db: web::Data<Arc<Database>>,
    sessions: web::Data<Arc<SessionStore>>,
) -> Result<HttpResponse, ApiError> {
    let member = current_member(&req, &sessions, db.async_connection.clone()).await?;
    let projects = visible_projects(db.async_connection.clone(), &member).await?;

    Ok(HttpResponse::Ok().json(summarize(&projects)))
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::*;
    use shared_types::{DashboardSummary, Task};

    #[actix_web::test]
    async fn test_summary_counts() {
        let state = state();
        let (_, john) = sign_up(&state, "John Doe", "john@example.com", "manager").await;

        let empty: DashboardSummary = call_ok(&state, get("/api/dashboard/summary", &john)).await;
        assert_eq!(empty, DashboardSummary::default());

        let first = project(&state, &john, "Website Redesign", "team").await;
        project(&state, &john, "Mobile App", "private").await;
        for (title, status) in [("Homepage", "completed"), ("Footer", "in_progress")] {
            call_ok::<Task>(
                &state,
                post(
                    &format!("/api/projects/{}/tasks", first),
                    &john,
                    serde_json::json!({ "title": title, "status": status }),
                ),
            )
            .await;
        }

        let summary: DashboardSummary = call_ok(&state, get("/api/dashboard/summary", &john)).await;
        assert_eq!(
            summary,
            DashboardSummary {
                total_projects: 2,
                total_tasks: 2,
                completed_tasks: 1,
            }
        );
    }
}
