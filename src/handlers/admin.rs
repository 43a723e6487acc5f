use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::cache::{DashboardStats, StatsCache};
use crate::error::{ApiResult, DbResultExt};

/// GET /api/admin/stats — dashboard counts, cached briefly.
pub async fn get_stats(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<StatsCache>,
) -> ApiResult<HttpResponse> {
    let stats = cache
        .get_or_load(|| DashboardStats::load(db.get_ref()))
        .await
        .or_internal("Failed to fetch dashboard stats")?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "stats": stats })))
}
