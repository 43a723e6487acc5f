use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::auth::middleware::Session;
use crate::auth::password;
use crate::auth::session::{self, SessionConfig};
use crate::db::users;
use crate::error::{ApiError, ApiResult, DbResultExt};
use crate::models::users::UserResponse;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/login — check credentials and issue a session cookie.
pub async fn login(
    db: web::Data<DatabaseConnection>,
    config: web::Data<SessionConfig>,
    body: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { email, password } = body.into_inner();

    let user = users::find_user_by_email(db.get_ref(), &email)
        .await
        .or_internal("Failed to sign in")?;

    let Some(user) = user else {
        web::block(move || password::verify_against_dummy(&password))
            .await
            .map_err(|_| ApiError::Internal("Failed to sign in".into()))?;
        tracing::info!("Login rejected for unknown email");
        return Err(ApiError::InvalidCredentials);
    };

    let hash = user.password.clone();
    let matches = web::block(move || password::verify_password(&password, &hash))
        .await
        .map_err(|_| ApiError::Internal("Failed to sign in".into()))?;

    if !matches {
        tracing::info!(user_id = %user.id, "Login rejected: wrong password");
        return Err(ApiError::InvalidCredentials);
    }

    let token = session::issue_token(&user, &config).map_err(|e| {
        tracing::error!(error = %e, "Failed to sign session token");
        ApiError::Internal("Failed to sign in".into())
    })?;

    tracing::info!(user_id = %user.id, role = user.role.as_str(), "User signed in");

    Ok(HttpResponse::Ok()
        .cookie(session::session_cookie(&token, &config))
        .json(serde_json::json!({
            "user": UserResponse::from(user),
            "token": token,
        })))
}

/// POST /api/auth/logout — drop the session cookie.
pub async fn logout() -> HttpResponse {
    HttpResponse::Ok()
        .cookie(session::clear_session_cookie())
        .json(serde_json::json!({ "success": true }))
}

/// GET /api/auth/session — the signed-in user, or 401.
pub async fn current_session(
    session: Session,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    let user = users::get_user_by_id(db.get_ref(), &session.0.sub)
        .await
        .or_internal("Failed to load session")?
        .ok_or(ApiError::Unauthorized)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "user": UserResponse::from(user) })))
}
