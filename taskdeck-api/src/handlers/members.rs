use actix_web::{web, HttpRequest, HttpResponse};
use shared_types::{CreateMemberRequest, MembersResponse, Role};
use std::sync::Arc;
use taskdeck_core::validation::validate_member;

use crate::database::members as members_db;
use crate::database::Database;
use crate::error::ApiError;
use crate::helpers::auth::current_member;
use crate::helpers::sessions::SessionStore;

/// Register a member.
///
/// Open to anyone, since sign-in needs an existing member, but only an admin
/// session may hand out a role other than `user`. The very first member of an
/// empty database may pick any role so a fresh install can get its admin.
pub async fn create_member(
    req: HttpRequest,
    db: web::Data<Arc<Database>>,
    sessions: web::Data<Arc<SessionStore>>,
    request: web::Json<CreateMemberRequest>,
) -> Result<HttpResponse, ApiError> {
    let new_member = validate_member(&request)?;

    if new_member.role != Role::User
        && members_db::count_members(db.async_connection.clone()).await? > 0
    {
        let granted_by = current_member(&req, &sessions, db.async_connection.clone()).await?;
        if granted_by.role != Role::Admin {
            return Err(ApiError::Forbidden(format!(
                "Only an admin can assign the {} role",
                new_member.role
            )));
        }
    }

    let member = members_db::insert_member(db.async_connection.clone(), &new_member).await?;
    tracing::info!("Registered member {} as {}", member.id, member.role);

    Ok(HttpResponse::Created().json(member))
}

pub async fn list_members(
    req: HttpRequest,
    db: web::Data<Arc<Database>>,
    sessions: web::Data<Arc<SessionStore>>,
) -> Result<HttpResponse, ApiError> {
    current_member(&req, &sessions, db.async_connection.clone()).await?;

    let members = members_db::list_members(db.async_connection.clone()).await?;

    Ok(HttpResponse::Ok().json(MembersResponse { members }))
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use shared_types::{Member, MembersResponse, Role};

    fn register(body: serde_json::Value) -> test::TestRequest {
        test::TestRequest::post().uri("/api/members").set_json(body)
    }

    #[actix_web::test]
    async fn test_register_and_list() {
        let state = state();
        let (_, token) = sign_up(&state, "Sarah Wilson", "sarah@example.com", "admin").await;

        let (status, body) = call(
            &state,
            register(serde_json::json!({ "name": "Mike Johnson", "email": "mike@example.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["role"], "user");

        let response: MembersResponse = call_ok(&state, get("/api/members", &token)).await;
        assert_eq!(response.members.len(), 2);
        assert_eq!(response.members[0].name, "Mike Johnson");
        assert_eq!(response.members[1].role, Role::Admin);
    }

    #[actix_web::test]
    async fn test_first_member_may_pick_a_role() {
        let state = state();

        let first: Member = call_ok(
            &state,
            register(serde_json::json!({
                "name": "Sarah Wilson",
                "email": "sarah@example.com",
                "role": "admin"
            })),
        )
        .await;
        assert_eq!(first.role, Role::Admin);
    }

    #[actix_web::test]
    async fn test_only_admins_grant_roles() {
        let state = state();
        let (_, john) = sign_up(&state, "John Doe", "john@example.com", "manager").await;
        let (_, sarah) = sign_up(&state, "Sarah Wilson", "sarah@example.com", "admin").await;
        let secret = project(&state, &john, "Secret", "private").await;

        let as_admin = serde_json::json!({
            "name": "Eve",
            "email": "eve@example.com",
            "role": "admin"
        });
        let (status, body) = call(&state, register(as_admin.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Not signed in");

        let (status, body) = call(&state, post("/api/members", &john, as_admin)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Only an admin can assign the admin role");

        let eve: Member = call_ok(
            &state,
            register(serde_json::json!({ "name": "Eve", "email": "eve@example.com" })),
        )
        .await;
        assert_eq!(eve.role, Role::User);

        let eve = sign_in(&state, "eve@example.com").await;
        let (status, _) = call(&state, get(&format!("/api/projects/{}", secret), &eve)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let mike: Member = call_ok(
            &state,
            post(
                "/api/members",
                &sarah,
                serde_json::json!({
                    "name": "Mike Johnson",
                    "email": "mike@example.com",
                    "role": "developer"
                }),
            ),
        )
        .await;
        assert_eq!(mike.role, Role::Developer);
    }

    #[actix_web::test]
    async fn test_register_rejects_bad_input() {
        let state = state();
        sign_up(&state, "Sarah Wilson", "sarah@example.com", "admin").await;

        let (status, _) = call(
            &state,
            register(serde_json::json!({ "name": "Sarah Again", "email": "SARAH@example.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = call(
            &state,
            register(serde_json::json!({ "name": "  ", "email": "blank@example.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(
            &state,
            register(serde_json::json!({ "name": "No At", "email": "example.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = call(
            &state,
            register(serde_json::json!({
                "name": "Root",
                "email": "root@example.com",
                "role": "superuser"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("unknown variant"));
    }
}
