pub mod inquiries;
pub mod packages;
pub mod projects;
pub mod users;

use sea_orm::{Database, DatabaseConnection};

use crate::config::AppConfig;

/// Create the process-wide SeaORM connection pool.
///
/// The returned connection pools internally and is shared by every request
/// through `web::Data`.
pub async fn create_pool(config: &AppConfig) -> DatabaseConnection {
    Database::connect(&config.database_url)
        .await
        .expect("Failed to connect to database")
}
