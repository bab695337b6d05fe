use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use shared_types::ErrorResponse;
use taskdeck_core::CoreError;

use crate::database::DbError;

/// Errors returned from handlers, rendered as `{"error": "..."}`
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Not signed in")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

impl actix_web::error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        if let Some(core) = e.downcast_ref::<CoreError>() {
            return ApiError::Validation(core.to_string());
        }

        match e.downcast_ref::<DbError>() {
            Some(DbError::NotFound(what)) => ApiError::NotFound(what.to_string()),
            Some(DbError::Conflict(msg)) => ApiError::Conflict(msg.clone()),
            None => {
                tracing::error!("Request failed: {:#}", e);
                ApiError::Internal(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::from(CoreError::EmptyField("Title")).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(anyhow::Error::from(DbError::NotFound("Task"))).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(anyhow::Error::from(DbError::Conflict("dup".to_string()))).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(anyhow::anyhow!("disk full")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::Forbidden("admins only".to_string()).status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_core_error_inside_anyhow_is_validation() {
        let err = anyhow::Error::from(CoreError::ParentNotFound {
            parent_id: 1,
            task_id: 2,
        });
        assert!(matches!(ApiError::from(err), ApiError::Validation(_)));
    }
}
