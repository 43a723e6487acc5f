pub mod admin;
pub mod auth;
pub mod inquiries;
pub mod packages;
pub mod projects;
pub mod seed;
pub mod uploads;

use actix_web::{HttpResponse, web};

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Session routes ──
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(auth::login))
            .route("/logout", web::post().to(auth::logout))
            .route("/session", web::get().to(auth::current_session)),
    );

    // ── Projects (reads public, writes admin-only via the route guard) ──
    cfg.service(
        web::resource("/projects")
            .route(web::get().to(projects::get_projects))
            .route(web::post().to(projects::create_project)),
    );
    cfg.service(
        web::resource("/projects/{id}")
            .route(web::put().to(projects::update_project))
            .route(web::delete().to(projects::delete_project)),
    );

    // ── Packages ──
    cfg.service(
        web::resource("/packages")
            .route(web::get().to(packages::get_packages))
            .route(web::post().to(packages::create_package)),
    );
    cfg.service(
        web::resource("/packages/{id}")
            .route(web::put().to(packages::update_package))
            .route(web::delete().to(packages::delete_package)),
    );

    // ── Inquiries (POST is the public contact form) ──
    cfg.service(
        web::resource("/inquiries")
            .route(web::get().to(inquiries::get_inquiries))
            .route(web::post().to(inquiries::create_inquiry)),
    );
    cfg.service(
        web::resource("/inquiries/{id}")
            .route(web::put().to(inquiries::update_inquiry))
            .route(web::delete().to(inquiries::delete_inquiry)),
    );

    // ── Admin-only views ──
    cfg.service(
        web::scope("/admin")
            .route("/projects", web::get().to(projects::get_all_projects))
            .route("/packages", web::get().to(packages::get_all_packages))
            .route("/stats", web::get().to(admin::get_stats)),
    );

    cfg.route("/uploads", web::post().to(uploads::upload_image));
    cfg.route("/seed", web::get().to(seed::seed_data));
    cfg.route("/health", web::get().to(health));
}

/// GET /api/health — liveness probe.
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}
