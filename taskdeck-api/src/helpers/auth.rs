use actix_web::http::header::AUTHORIZATION;
use actix_web::HttpRequest;
use shared_types::Member;

use crate::database::{members, AsyncDbConnection};
use crate::error::ApiError;
use crate::helpers::sessions::SessionStore;

/// Token from an `Authorization: Bearer <token>` header
pub fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolve the signed in member for a request
pub async fn current_member(
    req: &HttpRequest,
    sessions: &SessionStore,
    conn: AsyncDbConnection,
) -> Result<Member, ApiError> {
    let token = bearer_token(req).ok_or(ApiError::Unauthorized)?;
    let member_id = sessions
        .member_for(token)
        .await
        .ok_or(ApiError::Unauthorized)?;

    Ok(members::get_member(conn, member_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_bearer_token_parsing() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer abc123"))
            .to_http_request();
        assert_eq!(bearer_token(&req), Some("abc123"));

        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Basic abc123"))
            .to_http_request();
        assert_eq!(bearer_token(&req), None);

        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer "))
            .to_http_request();
        assert_eq!(bearer_token(&req), None);

        assert_eq!(bearer_token(&TestRequest::default().to_http_request()), None);
    }
}
