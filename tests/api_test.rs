//! End-to-end tests for the HTTP surface.
//!
//! The app is assembled exactly as `main` does it, but backed by a
//! `MockDatabase` and an in-memory blob store, so no Postgres is needed.
//!
//! Run with: `cargo test --test api_test`
use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::middleware::from_fn;
use actix_web::{App, test, web};
use async_trait::async_trait;
use sea_orm::{
    DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult, Statement, Value as DbValue,
};
use serde_json::{Value, json};

use waenweb_backend::api_config;
use waenweb_backend::auth::middleware::admin_guard;
use waenweb_backend::auth::session::{self, SessionConfig};
use waenweb_backend::cache::StatsCache;
use waenweb_backend::config::SeedConfig;
use waenweb_backend::models::inquiries::{self, Status};
use waenweb_backend::models::{packages, projects};
use waenweb_backend::models::users::{self, Roles};
use waenweb_backend::storage::{BlobStore, StorageError};

const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

/// Records nothing and hands back a predictable URL.
struct MemoryBlobStore;

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(
        &self,
        pathname: &str,
        _content_type: &str,
        _bytes: Vec<u8>,
    ) -> Result<String, StorageError> {
        Ok(format!("https://blob.test/{pathname}"))
    }
}

fn session_config() -> SessionConfig {
    SessionConfig {
        secret: TEST_SECRET.into(),
        ttl_hours: 1,
        secure_cookie: false,
    }
}

fn seed_config() -> SeedConfig {
    SeedConfig {
        production: true,
        token: Some("s3cret".into()),
    }
}

macro_rules! test_app {
    ($db:expr) => {{
        let blob_store: Arc<dyn BlobStore> = Arc::new(MemoryBlobStore);
        test::init_service(
            App::new()
                .wrap(from_fn(admin_guard))
                .app_data(web::Data::new($db))
                .app_data(web::Data::new(session_config()))
                .app_data(web::Data::new(seed_config()))
                .app_data(web::Data::new(StatsCache::default()))
                .app_data(web::Data::from(blob_store))
                .configure(api_config),
        )
        .await
    }};
}

fn empty_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres).into_connection()
}

fn user(role: Roles, password_hash: &str) -> users::Model {
    let now = chrono::Utc::now();
    users::Model {
        id: "user-1".into(),
        email: "owner@example.com".into(),
        name: Some("Owner".into()),
        password: password_hash.into(),
        role,
        created_at: now,
        updated_at: now,
    }
}

fn project(id: &str, sort_order: i32, is_active: bool) -> projects::Model {
    let now = chrono::Utc::now();
    projects::Model {
        id: id.into(),
        title: format!("Project {id}"),
        category: "Corporate".into(),
        description: Some("Old description".into()),
        desktop_image: None,
        mobile_image: None,
        website_url: Some("https://old.example".into()),
        sort_order,
        is_active,
        created_at: now,
        updated_at: now,
    }
}

fn package(features: Option<&str>) -> packages::Model {
    let now = chrono::Utc::now();
    packages::Model {
        id: "pkg-1".into(),
        name: "Starter".into(),
        name_en: None,
        price: 8900,
        description: None,
        features: features.map(str::to_string),
        duration: None,
        is_popular: false,
        is_active: true,
        sort_order: 0,
        created_at: now,
        updated_at: now,
    }
}

fn inquiry(status: Status) -> inquiries::Model {
    let now = chrono::Utc::now();
    inquiries::Model {
        id: "inq-1".into(),
        name: "Somchai".into(),
        email: "somchai@example.com".into(),
        phone: Some("0800000000".into()),
        company: None,
        package_id: None,
        message: "Need a landing page".into(),
        status,
        created_at: now,
        updated_at: now,
    }
}

/// Every statement the mock connection has seen, in order.
fn statements(db: DatabaseConnection) -> Vec<Statement> {
    db.into_transaction_log()
        .into_iter()
        .flat_map(|txn| txn.statements().to_vec())
        .collect()
}

fn binds(stmt: &Statement, value: DbValue) -> bool {
    stmt.values
        .as_ref()
        .is_some_and(|values| values.0.iter().any(|v| *v == value))
}

fn bearer(role: Roles) -> (header::HeaderName, String) {
    let token = session::issue_token(&user(role, "unused"), &session_config()).unwrap();
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

// ── Route guard ──

#[actix_web::test]
async fn admin_page_without_session_redirects_to_login() {
    let app = test_app!(empty_db());

    let req = test::TestRequest::get().uri("/admin/dashboard").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/admin/login"
    );
}

#[actix_web::test]
async fn login_page_is_not_guarded() {
    let app = test_app!(empty_db());

    let req = test::TestRequest::get().uri("/admin/login").to_request();
    let resp = test::call_service(&app, req).await;

    // No static frontend is mounted here, so the request falls through.
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn admin_api_without_session_is_unauthorized() {
    let app = test_app!(empty_db());

    let req = test::TestRequest::post().uri("/api/uploads").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Unauthorized" }));
}

#[actix_web::test]
async fn non_admin_session_cannot_use_admin_api() {
    let app = test_app!(empty_db());

    let req = test::TestRequest::get()
        .uri("/api/admin/stats")
        .insert_header(bearer(Roles::User))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn percent_encoded_admin_paths_are_still_guarded() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let app = test_app!(db);

    let req = test::TestRequest::delete()
        .uri("/api/%70rojects/p1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    for uri in ["/api/%61dmin/stats", "/api/%69nquiries", "/%61dmin/dashboard"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_ne!(resp.status(), StatusCode::OK, "{uri} must be guarded");
    }

    let req = test::TestRequest::post().uri("/api/%75ploads").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn stale_cookie_does_not_hide_valid_bearer() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<projects::Model>::new()])
        .into_connection();
    let app = test_app!(db);

    let req = test::TestRequest::get()
        .uri("/api/admin/projects")
        .cookie(actix_web::cookie::Cookie::new(session::SESSION_COOKIE, "expired"))
        .insert_header(bearer(Roles::Admin))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn public_listing_needs_no_session() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<packages::Model>::new()])
        .into_connection();
    let app = test_app!(db);

    let req = test::TestRequest::get().uri("/api/packages").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "packages": [] }));
}

// ── Login ──

#[actix_web::test]
async fn unknown_email_and_wrong_password_fail_identically() {
    let hash = bcrypt::hash("correct-horse", 4).unwrap();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<users::Model>::new()])
        .append_query_results([vec![user(Roles::Admin, &hash)]])
        .into_connection();
    let app = test_app!(db);

    let unknown = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "nobody@example.com", "password": "whatever" }))
        .to_request();
    let resp = test::call_service(&app, unknown).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let unknown_body: Value = test::read_body_json(resp).await;

    let wrong = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "owner@example.com", "password": "battery-staple" }))
        .to_request();
    let resp = test::call_service(&app, wrong).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let wrong_body: Value = test::read_body_json(resp).await;

    assert_eq!(unknown_body, wrong_body);
    assert_eq!(unknown_body["error"], "Invalid email or password");
}

#[actix_web::test]
async fn successful_login_sets_session_cookie() {
    let hash = bcrypt::hash("correct-horse", 4).unwrap();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user(Roles::Admin, &hash)]])
        .into_connection();
    let app = test_app!(db);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "owner@example.com", "password": "correct-horse" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == session::SESSION_COOKIE)
        .expect("session cookie set");
    assert_eq!(cookie.http_only(), Some(true));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["role"], "ADMIN");
    assert!(body["user"].get("password").is_none());
}

#[actix_web::test]
async fn malformed_login_body_is_a_bad_request() {
    let app = test_app!(empty_db());

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid request body");
}

// ── Content ──

#[actix_web::test]
async fn created_package_returns_feature_list() {
    let now = chrono::Utc::now();
    let stored = packages::Model {
        id: "pkg-1".into(),
        name: "Starter".into(),
        name_en: None,
        price: 8900,
        description: None,
        features: Some("A\nB".into()),
        duration: None,
        is_popular: false,
        is_active: true,
        sort_order: 0,
        created_at: now,
        updated_at: now,
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![stored]])
        .into_connection();
    let app = test_app!(db);

    let req = test::TestRequest::post()
        .uri("/api/packages")
        .insert_header(bearer(Roles::Admin))
        .set_json(json!({ "name": "Starter", "price": 8900, "features": ["A", " B ", ""] }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["package"]["features"], json!(["A", "B"]));
    assert_eq!(body["package"]["isActive"], true);
}

#[actix_web::test]
async fn public_projects_are_active_only_in_display_order() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![project("p1", 0, true), project("p2", 1, true)]])
        .into_connection();
    let app = test_app!(db.clone());

    let req = test::TestRequest::get().uri("/api/projects").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["projects"][0]["id"], "p1");
    assert_eq!(body["projects"][1]["sortOrder"], 1);

    let stmts = statements(db);
    assert_eq!(stmts.len(), 1);
    let sql = &stmts[0].sql;
    assert!(sql.contains(r#"WHERE "projects"."is_active" = "#), "{sql}");
    assert!(binds(&stmts[0], DbValue::from(true)));
    assert!(
        sql.contains(r#"ORDER BY "projects"."sort_order" ASC, "projects"."created_at" ASC"#),
        "{sql}"
    );
}

#[actix_web::test]
async fn admin_projects_include_hidden_rows() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![project("p1", 0, true), project("p2", 1, false)]])
        .into_connection();
    let app = test_app!(db.clone());

    let req = test::TestRequest::get()
        .uri("/api/admin/projects")
        .insert_header(bearer(Roles::Admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["projects"][1]["isActive"], false);

    let stmts = statements(db);
    let sql = &stmts[0].sql;
    assert!(!sql.contains("WHERE"), "{sql}");
    assert!(sql.contains(r#"ORDER BY "projects"."sort_order" ASC"#), "{sql}");
}

#[actix_web::test]
async fn project_update_with_null_clears_the_column() {
    let mut updated = project("p1", 0, true);
    updated.title = "Renamed".into();
    updated.website_url = None;
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![project("p1", 0, true)]])
        .append_query_results([vec![updated]])
        .into_connection();
    let app = test_app!(db.clone());

    let req = test::TestRequest::put()
        .uri("/api/projects/p1")
        .insert_header(bearer(Roles::Admin))
        .set_json(json!({ "title": "Renamed", "websiteUrl": null }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["project"]["title"], "Renamed");
    assert!(body["project"]["websiteUrl"].is_null());

    let stmts = statements(db);
    let update = &stmts[1];
    assert!(update.sql.starts_with("UPDATE"), "{}", update.sql);
    assert!(update.sql.contains(r#""website_url" = "#), "{}", update.sql);
    assert!(binds(update, DbValue::String(None)));
    // Absent fields are left alone.
    assert!(!update.sql.contains(r#""description" = "#), "{}", update.sql);
}

#[actix_web::test]
async fn package_update_re_encodes_features() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![package(Some("A\nB"))]])
        .append_query_results([vec![package(Some("X\nY"))]])
        .into_connection();
    let app = test_app!(db.clone());

    let req = test::TestRequest::put()
        .uri("/api/packages/pkg-1")
        .insert_header(bearer(Roles::Admin))
        .set_json(json!({ "features": ["X", "", " Y "] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["package"]["features"], json!(["X", "Y"]));

    let stmts = statements(db);
    assert!(binds(&stmts[1], DbValue::from("X\nY")));
}

#[actix_web::test]
async fn inquiry_status_can_move_to_any_value() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![inquiry(Status::Archived)]])
        .append_query_results([vec![inquiry(Status::New)]])
        .into_connection();
    let app = test_app!(db.clone());

    // ARCHIVED straight back to NEW is allowed.
    let req = test::TestRequest::put()
        .uri("/api/inquiries/inq-1")
        .insert_header(bearer(Roles::Admin))
        .set_json(json!({ "status": "NEW", "phone": null }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["inquiry"]["status"], "NEW");

    let stmts = statements(db);
    assert!(binds(&stmts[1], DbValue::from("NEW")));
    assert!(stmts[1].sql.contains(r#""phone" = "#), "{}", stmts[1].sql);
}

#[actix_web::test]
async fn updating_missing_inquiry_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<inquiries::Model>::new()])
        .into_connection();
    let app = test_app!(db);

    let req = test::TestRequest::put()
        .uri("/api/inquiries/gone")
        .insert_header(bearer(Roles::Admin))
        .set_json(json!({ "status": "READ" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Inquiry gone not found");
}

#[actix_web::test]
async fn deleting_missing_project_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();
    let app = test_app!(db);

    let req = test::TestRequest::delete()
        .uri("/api/projects/does-not-exist")
        .insert_header(bearer(Roles::Admin))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Project does-not-exist not found");
}

#[actix_web::test]
async fn contact_form_creates_new_inquiry() {
    let now = chrono::Utc::now();
    let stored = inquiries::Model {
        id: "inq-1".into(),
        name: "Somchai".into(),
        email: "somchai@example.com".into(),
        phone: None,
        company: None,
        package_id: None,
        message: "Need a landing page".into(),
        status: Status::New,
        created_at: now,
        updated_at: now,
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![stored]])
        .into_connection();
    let app = test_app!(db);

    // A client-supplied status is ignored.
    let req = test::TestRequest::post()
        .uri("/api/inquiries")
        .set_json(json!({
            "name": "Somchai",
            "email": "somchai@example.com",
            "packageId": "",
            "message": "Need a landing page",
            "status": "ARCHIVED",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["inquiry"]["status"], "NEW");
    assert!(body["inquiry"]["packageId"].is_null());
}

#[actix_web::test]
async fn inquiry_list_is_admin_only() {
    let app = test_app!(empty_db());

    let req = test::TestRequest::get().uri("/api/inquiries").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// ── Seed ──

#[actix_web::test]
async fn seed_with_wrong_token_is_rejected() {
    let app = test_app!(empty_db());

    let req = test::TestRequest::get()
        .uri("/api/seed?token=wrong")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// ── Uploads ──

fn multipart_body(boundary: &str, filename: &str, content_type: &str, data: &str) -> String {
    format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
         Content-Type: {content_type}\r\n\r\n\
         {data}\r\n\
         --{boundary}--\r\n"
    )
}

#[actix_web::test]
async fn upload_rejects_non_image_types() {
    let app = test_app!(empty_db());
    let boundary = "X-TEST-BOUNDARY";

    let req = test::TestRequest::post()
        .uri("/api/uploads")
        .insert_header(bearer(Roles::Admin))
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(multipart_body(boundary, "notes.txt", "text/plain", "hello"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["error"],
        "Unsupported file type. Use JPG, PNG, WEBP, or GIF."
    );
}

#[actix_web::test]
async fn upload_handler_requires_admin_without_the_guard() {
    let blob_store: Arc<dyn BlobStore> = Arc::new(MemoryBlobStore);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(session_config()))
            .app_data(web::Data::from(blob_store))
            .route("/upload", web::post().to(waenweb_backend::handlers::uploads::upload_image)),
    )
    .await;
    let boundary = "X-TEST-BOUNDARY";

    for auth in [None, Some(bearer(Roles::User))] {
        let mut req = test::TestRequest::post().uri("/upload").insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        ));
        if let Some(auth) = auth {
            req = req.insert_header(auth);
        }
        let req = req
            .set_payload(multipart_body(boundary, "a.png", "image/png", "PNGDATA"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}

#[actix_web::test]
async fn upload_stores_image_and_returns_url() {
    let app = test_app!(empty_db());
    let boundary = "X-TEST-BOUNDARY";

    let req = test::TestRequest::post()
        .uri("/api/uploads")
        .insert_header(bearer(Roles::Admin))
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(multipart_body(boundary, "hero shot.png", "image/png", "PNGDATA"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let url = body["url"].as_str().unwrap();
    assert!(url.starts_with("https://blob.test/projects/"));
    assert!(url.ends_with("-hero-shot.png"));
}

#[actix_web::test]
async fn upload_without_file_field_is_a_bad_request() {
    let app = test_app!(empty_db());
    let boundary = "X-TEST-BOUNDARY";
    let payload = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"caption\"\r\n\r\n\
         hello\r\n\
         --{boundary}--\r\n"
    );

    let req = test::TestRequest::post()
        .uri("/api/uploads")
        .insert_header(bearer(Roles::Admin))
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "File is required");
}
