use actix_cors::Cors;
use actix_files::Files;
use actix_web::middleware::from_fn;
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use waenweb_backend::auth::middleware::admin_guard;
use waenweb_backend::auth::session::SessionConfig;
use waenweb_backend::cache::StatsCache;
use waenweb_backend::config::{AppConfig, SeedConfig};
use waenweb_backend::storage::{BlobStore, HttpBlobStore};
use waenweb_backend::{api_config, create_pool};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = AppConfig::from_env();

    let db = create_pool(&config).await;
    if config.run_migrations {
        Migrator::up(&db, None)
            .await
            .expect("Failed to run database migrations");
        tracing::info!("Database migrations applied");
    }
    let db_data = web::Data::new(db);

    let session_data = web::Data::new(SessionConfig::from(&config));
    let seed_data = web::Data::new(SeedConfig::from(&config));
    let stats_data = web::Data::new(StatsCache::default());

    if config.blob_token.is_none() {
        tracing::warn!("BLOB_READ_WRITE_TOKEN not set; image uploads will fail");
    }
    let blob_store: Arc<dyn BlobStore> = Arc::new(HttpBlobStore::new(
        &config.blob_api_url,
        config.blob_token.clone(),
    ));
    let blob_data = web::Data::from(blob_store);

    let frontend_dir = config.frontend_dir.clone().filter(|dir| {
        let exists = dir.is_dir();
        if !exists {
            tracing::warn!(dir = %dir.display(), "FRONTEND_DIR is not a directory; static pages disabled");
        }
        exists
    });

    let bind_addr = format!("0.0.0.0:{}", config.port);
    tracing::info!(environment = ?config.environment, "Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        let app = App::new()
            .wrap(from_fn(admin_guard))
            .wrap(cors)
            .app_data(db_data.clone())
            .app_data(session_data.clone())
            .app_data(seed_data.clone())
            .app_data(stats_data.clone())
            .app_data(blob_data.clone())
            .configure(api_config);

        match &frontend_dir {
            Some(dir) => app.service(Files::new("/", dir).index_file("index.html")),
            None => app,
        }
    })
    .bind(&bind_addr)?
    .run()
    .await
}
