use actix_web::{web, HttpRequest, HttpResponse};
use shared_types::{SessionResponse, SignInRequest};
use std::sync::Arc;
use taskdeck_core::validation::normalize_email;

use crate::database::members as members_db;
use crate::database::Database;
use crate::error::ApiError;
use crate::helpers::auth::{bearer_token, current_member};
use crate::helpers::sessions::SessionStore;

/// Sign in an already registered member by email
pub async fn sign_in(
    db: web::Data<Arc<Database>>,
    sessions: web::Data<Arc<SessionStore>>,
    request: web::Json<SignInRequest>,
) -> Result<HttpResponse, ApiError> {
    let email = normalize_email(&request.email)?;

    let member = members_db::find_member_by_email(db.async_connection.clone(), &email)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    let (token, session) = sessions.create(member.id).await;
    tracing::info!("Member {} signed in", member.id);

    Ok(HttpResponse::Ok().json(SessionResponse {
        token,
        member,
        expires_at: session.expires_at.timestamp(),
    }))
}

pub async fn me(
    req: HttpRequest,
    db: web::Data<Arc<Database>>,
    sessions: web::Data<Arc<SessionStore>>,
) -> Result<HttpResponse, ApiError> {
    let member = current_member(&req, &sessions, db.async_connection.clone()).await?;
    Ok(HttpResponse::Ok().json(member))
}

pub async fn sign_out(
    req: HttpRequest,
    sessions: web::Data<Arc<SessionStore>>,
) -> Result<HttpResponse, ApiError> {
    let token = bearer_token(&req).ok_or(ApiError::Unauthorized)?;

    if !sessions.revoke(token).await {
        return Err(ApiError::Unauthorized);
    }

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use shared_types::{Member, Role};

    #[actix_web::test]
    async fn test_sign_in_me_sign_out() {
        let state = state();
        let (member, token) = sign_up(&state, "John Doe", "John@Example.com", "manager").await;
        assert_eq!(member.email, "john@example.com");

        let me: Member = call_ok(&state, get("/api/auth/me", &token)).await;
        assert_eq!(me.id, member.id);
        assert_eq!(me.role, Role::Manager);

        let req = test::TestRequest::delete()
            .uri("/api/auth/sessions")
            .insert_header(("Authorization", token.clone()));
        let (status, _) = call(&state, req).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = call(&state, get("/api/auth/me", &token)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_sign_in_unknown_email() {
        let state = state();
        let req = test::TestRequest::post()
            .uri("/api/auth/sessions")
            .set_json(serde_json::json!({ "email": "nobody@example.com" }));

        let (status, _) = call(&state, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
