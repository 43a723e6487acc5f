use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;

/// Error returned by every HTTP handler.
///
/// Rendered as `{ "error": <message> }`. `Internal` carries only the public
/// message; the underlying cause is logged where the error is created.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    /// Same message whether the email is unknown or the password is wrong.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string(),
        }))
    }
}

/// Maps repository errors onto [`ApiError`] with a per-operation message.
pub trait DbResultExt<T> {
    /// `RecordNotFound` becomes a 404 carrying the repository's message; any
    /// other failure is logged and surfaces as a 500 with `context` only.
    fn or_internal(self, context: &str) -> ApiResult<T>;
}

impl<T> DbResultExt<T> for Result<T, DbErr> {
    fn or_internal(self, context: &str) -> ApiResult<T> {
        self.map_err(|e| match e {
            DbErr::RecordNotFound(what) => ApiError::NotFound(what),
            other => {
                tracing::error!(error = %other, "{context}");
                ApiError::Internal(context.to_string())
            }
        })
    }
}

/// Replacement for actix's plain-text JSON extractor errors.
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected request body");
    ApiError::bad_request("Invalid request body").into()
}
