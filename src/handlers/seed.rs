use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::cache::StatsCache;
use crate::config::SeedConfig;
use crate::error::{ApiError, ApiResult};
use crate::seed;

#[derive(Debug, Deserialize)]
pub struct SeedQuery {
    pub token: Option<String>,
}

/// GET /api/seed?token=… — provision the admin account and sample content.
///
/// Disabled in production unless `SEED_TOKEN` is configured; when a token is
/// configured the query must match it.
pub async fn seed_data(
    db: web::Data<DatabaseConnection>,
    config: web::Data<SeedConfig>,
    stats: web::Data<StatsCache>,
    query: web::Query<SeedQuery>,
) -> ApiResult<HttpResponse> {
    authorize(&config, query.token.as_deref())?;

    let summary = seed::run(db.get_ref()).await.map_err(|e| {
        tracing::error!(error = %e, "Seed failed");
        ApiError::Internal("Failed to seed data".into())
    })?;
    stats.invalidate();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Sample data seeded",
        "admin": { "email": summary.admin_email, "created": summary.admin_created },
        "projects": summary.projects,
        "packages": summary.packages,
    })))
}

fn authorize(config: &SeedConfig, supplied: Option<&str>) -> ApiResult<()> {
    match config.token.as_deref() {
        None if config.production => Err(ApiError::Forbidden(
            "Seed endpoint is disabled in production".into(),
        )),
        None => Ok(()),
        Some(expected) if supplied == Some(expected) => Ok(()),
        Some(_) => {
            tracing::warn!("Seed request with a wrong token");
            Err(ApiError::Unauthorized)
        }
    }
}
