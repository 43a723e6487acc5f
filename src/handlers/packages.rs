use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::cache::StatsCache;
use crate::db::packages as package_db;
use crate::error::{ApiResult, DbResultExt};
use crate::models::ListFilter;
use crate::models::packages::{CreatePackage, PackageResponse, UpdatePackage};

/// GET /api/packages — active packages with decoded feature lists (public).
pub async fn get_packages(db: web::Data<DatabaseConnection>) -> ApiResult<HttpResponse> {
    list(db.get_ref(), ListFilter::public()).await
}

/// GET /api/admin/packages — every package, including hidden ones.
pub async fn get_all_packages(db: web::Data<DatabaseConnection>) -> ApiResult<HttpResponse> {
    list(db.get_ref(), ListFilter::all()).await
}

async fn list(db: &DatabaseConnection, filter: ListFilter) -> ApiResult<HttpResponse> {
    let packages: Vec<PackageResponse> = package_db::list_packages(db, filter)
        .await
        .or_internal("Failed to fetch packages")?
        .into_iter()
        .map(PackageResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({ "packages": packages })))
}

/// POST /api/packages — create a package; `features` may be a list or text.
pub async fn create_package(
    db: web::Data<DatabaseConnection>,
    stats: web::Data<StatsCache>,
    body: web::Json<CreatePackage>,
) -> ApiResult<HttpResponse> {
    let package = package_db::insert_package(db.get_ref(), body.into_inner())
        .await
        .or_internal("Failed to create package")?;
    stats.invalidate();

    Ok(HttpResponse::Created().json(serde_json::json!({
        "package": PackageResponse::from(package),
    })))
}

/// PUT /api/packages/{id} — update a package.
pub async fn update_package(
    db: web::Data<DatabaseConnection>,
    stats: web::Data<StatsCache>,
    path: web::Path<String>,
    body: web::Json<UpdatePackage>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let package = package_db::update_package(db.get_ref(), &id, body.into_inner())
        .await
        .or_internal("Failed to update package")?;
    stats.invalidate();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "package": PackageResponse::from(package),
    })))
}

/// DELETE /api/packages/{id} — delete a package.
pub async fn delete_package(
    db: web::Data<DatabaseConnection>,
    stats: web::Data<StatsCache>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    package_db::delete_package(db.get_ref(), &id)
        .await
        .or_internal("Failed to delete package")?;
    stats.invalidate();

    tracing::info!(%id, "Package deleted");
    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}
