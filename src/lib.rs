pub mod auth;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod features;
pub mod handlers;
pub mod models;
pub mod seed;
pub mod storage;

pub use db::create_pool;

use actix_web::web;

/// Mount the JSON API under `/api`, with JSON body errors mapped to 400s.
///
/// Shared state (`DatabaseConnection`, `SessionConfig`, `SeedConfig`,
/// `StatsCache`, `dyn BlobStore`) must be registered by the caller.
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .service(web::scope("/api").configure(handlers::init_routes));
}
