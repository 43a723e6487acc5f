use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::cache::StatsCache;
use crate::db::inquiries as inquiry_db;
use crate::error::{ApiResult, DbResultExt};
use crate::models::inquiries::{CreateInquiry, UpdateInquiry};

/// GET /api/inquiries — all inquiries, newest first.
pub async fn get_inquiries(db: web::Data<DatabaseConnection>) -> ApiResult<HttpResponse> {
    let inquiries = inquiry_db::list_inquiries(db.get_ref())
        .await
        .or_internal("Failed to fetch inquiries")?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "inquiries": inquiries })))
}

/// POST /api/inquiries — contact-form submission (public). Status is always NEW.
pub async fn create_inquiry(
    db: web::Data<DatabaseConnection>,
    stats: web::Data<StatsCache>,
    body: web::Json<CreateInquiry>,
) -> ApiResult<HttpResponse> {
    let inquiry = inquiry_db::insert_inquiry(db.get_ref(), body.into_inner())
        .await
        .or_internal("Failed to create inquiry")?;
    stats.invalidate();

    tracing::info!(id = %inquiry.id, "New inquiry received");
    Ok(HttpResponse::Created().json(serde_json::json!({ "inquiry": inquiry })))
}

/// PUT /api/inquiries/{id} — update an inquiry (typically its status).
pub async fn update_inquiry(
    db: web::Data<DatabaseConnection>,
    stats: web::Data<StatsCache>,
    path: web::Path<String>,
    body: web::Json<UpdateInquiry>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let inquiry = inquiry_db::update_inquiry(db.get_ref(), &id, body.into_inner())
        .await
        .or_internal("Failed to update inquiry")?;
    stats.invalidate();

    Ok(HttpResponse::Ok().json(serde_json::json!({ "inquiry": inquiry })))
}

/// DELETE /api/inquiries/{id} — delete an inquiry.
pub async fn delete_inquiry(
    db: web::Data<DatabaseConnection>,
    stats: web::Data<StatsCache>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    inquiry_db::delete_inquiry(db.get_ref(), &id)
        .await
        .or_internal("Failed to delete inquiry")?;
    stats.invalidate();

    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}
