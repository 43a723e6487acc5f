use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::cache::StatsCache;
use crate::db::projects as project_db;
use crate::error::{ApiResult, DbResultExt};
use crate::models::ListFilter;
use crate::models::projects::{CreateProject, UpdateProject};

/// GET /api/projects — active projects in display order (public).
pub async fn get_projects(db: web::Data<DatabaseConnection>) -> ApiResult<HttpResponse> {
    list(db.get_ref(), ListFilter::public()).await
}

/// GET /api/admin/projects — every project, including hidden ones.
pub async fn get_all_projects(db: web::Data<DatabaseConnection>) -> ApiResult<HttpResponse> {
    list(db.get_ref(), ListFilter::all()).await
}

async fn list(db: &DatabaseConnection, filter: ListFilter) -> ApiResult<HttpResponse> {
    let projects = project_db::list_projects(db, filter)
        .await
        .or_internal("Failed to fetch projects")?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "projects": projects })))
}

/// POST /api/projects — create a project.
pub async fn create_project(
    db: web::Data<DatabaseConnection>,
    stats: web::Data<StatsCache>,
    body: web::Json<CreateProject>,
) -> ApiResult<HttpResponse> {
    let project = project_db::insert_project(db.get_ref(), body.into_inner())
        .await
        .or_internal("Failed to create project")?;
    stats.invalidate();

    Ok(HttpResponse::Created().json(serde_json::json!({ "project": project })))
}

/// PUT /api/projects/{id} — update a project.
pub async fn update_project(
    db: web::Data<DatabaseConnection>,
    stats: web::Data<StatsCache>,
    path: web::Path<String>,
    body: web::Json<UpdateProject>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let project = project_db::update_project(db.get_ref(), &id, body.into_inner())
        .await
        .or_internal("Failed to update project")?;
    stats.invalidate();

    Ok(HttpResponse::Ok().json(serde_json::json!({ "project": project })))
}

/// DELETE /api/projects/{id} — delete a project.
pub async fn delete_project(
    db: web::Data<DatabaseConnection>,
    stats: web::Data<StatsCache>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    project_db::delete_project(db.get_ref(), &id)
        .await
        .or_internal("Failed to delete project")?;
    stats.invalidate();

    tracing::info!(%id, "Project deleted");
    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}
