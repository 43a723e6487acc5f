//! Provisioning of the admin account and the site's starter content.
//!
//! Every step is skipped when its row already exists, so running the seeder
//! twice leaves the database unchanged.

use sea_orm::{DatabaseConnection, DbErr};
use serde::Serialize;

use crate::auth::password;
use crate::db::{packages, projects, users};
use crate::features;
use crate::models::packages::CreatePackage;
use crate::models::projects::CreateProject;
use crate::models::users::{CreateUser, Roles};

pub const ADMIN_EMAIL: &str = "admin@waenweb.com";
const ADMIN_NAME: &str = "Admin";
const ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Db(#[from] DbErr),

    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("password hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// What a seeding run created.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedSummary {
    pub admin_email: String,
    pub admin_created: bool,
    pub projects: usize,
    pub packages: usize,
}

struct SampleProject {
    title: &'static str,
    category: &'static str,
    description: &'static str,
    desktop_image: &'static str,
    website_url: Option<&'static str>,
}

const SAMPLE_PROJECTS: [SampleProject; 3] = [
    SampleProject {
        title: "A-FACTORY",
        category: "E-Commerce / Dental Equipment",
        description: "เว็บไซต์ขายอุปกรณ์ทันตกรรมครบวงจร",
        desktop_image: "https://images.unsplash.com/photo-1467232004584-a241de8bcf5d?w=800",
        website_url: Some("https://a-factoryonline.com"),
    },
    SampleProject {
        title: "Flying Turtle Coffee",
        category: "Corporate / Brand Website",
        description: "เว็บไซต์แบรนด์กาแฟหุ่นยนต์",
        desktop_image: "https://images.unsplash.com/photo-1519389950473-47ba0277781c?w=800",
        website_url: None,
    },
    SampleProject {
        title: "Grasshopper Collective",
        category: "Landing Page / Cannabis",
        description: "Landing page สำหรับร้านกัญชา",
        desktop_image: "https://images.unsplash.com/photo-1517248135467-4c7edcad34c4?w=800",
        website_url: None,
    },
];

struct SamplePackage {
    name: &'static str,
    price: i32,
    description: &'static str,
    duration: &'static str,
    is_popular: bool,
    features: &'static [&'static str],
}

const SAMPLE_PACKAGES: [SamplePackage; 3] = [
    SamplePackage {
        name: "Landing Page",
        price: 8900,
        description: "เว็บไซต์ Landing Page โดดเด่น รองรับทุกอุปกรณ์",
        duration: "7-14 วัน",
        is_popular: false,
        features: &[
            "ออกแบบ UI/UX สวยงาม",
            "รองรับมือถือ & แท็บเล็ต",
            "ฟอร์มติดต่อ + Google Maps",
            "SEO มาตรฐาน",
            "SSL Certificate ฟรี",
        ],
    },
    SamplePackage {
        name: "Business Website",
        price: 15900,
        description: "เว็บไซต์ธุรกิจครบวงจร พร้อมระบบจัดการ",
        duration: "14-21 วัน",
        is_popular: true,
        features: &[
            "หน้าเว็บสูงสุด 7 หน้า",
            "ระบบ CMS จัดการเนื้อหา",
            "ระบบ Blog & News",
            "รองรับหลายภาษา",
            "Google Analytics",
            "แก้ไขฟรี 3 ครั้ง",
        ],
    },
    SamplePackage {
        name: "E-Commerce",
        price: 29900,
        description: "ร้านค้าออนไลน์ครบวงจร พร้อมระบบชำระเงิน",
        duration: "21-30 วัน",
        is_popular: false,
        features: &[
            "ระบบสินค้า & สต็อก",
            "ตะกร้าสินค้า & Checkout",
            "ระบบชำระเงิน (PromptPay, Credit)",
            "ระบบสมาชิก & ประวัติการสั่งซื้อ",
            "ระบบจัดการคำสั่งซื้อ",
            "SSL & Security สูงสุด",
        ],
    },
];

/// Create the admin user, sample projects and default packages where missing.
pub async fn run(db: &DatabaseConnection) -> Result<SeedSummary, SeedError> {
    let admin_created = ensure_admin(db).await?;

    let mut created_projects = 0;
    for (order, sample) in SAMPLE_PROJECTS.iter().enumerate() {
        if projects::find_project_by_title(db, sample.title).await?.is_some() {
            continue;
        }
        projects::insert_project(
            db,
            CreateProject {
                title: sample.title.to_string(),
                category: sample.category.to_string(),
                description: Some(sample.description.to_string()),
                desktop_image: Some(sample.desktop_image.to_string()),
                mobile_image: None,
                website_url: sample.website_url.map(str::to_string),
                sort_order: Some(order as i32),
                is_active: Some(true),
            },
        )
        .await?;
        created_projects += 1;
    }

    let mut created_packages = 0;
    for (order, sample) in SAMPLE_PACKAGES.iter().enumerate() {
        if packages::find_package_by_name(db, sample.name).await?.is_some() {
            continue;
        }
        packages::insert_package(
            db,
            CreatePackage {
                name: sample.name.to_string(),
                name_en: Some(sample.name.to_string()),
                price: sample.price,
                description: Some(sample.description.to_string()),
                features: Some(serde_json::Value::String(features::encode_lines(
                    sample.features,
                ))),
                duration: Some(sample.duration.to_string()),
                is_popular: Some(sample.is_popular),
                is_active: Some(true),
                sort_order: Some(order as i32),
            },
        )
        .await?;
        created_packages += 1;
    }

    tracing::info!(
        admin_created,
        projects = created_projects,
        packages = created_packages,
        "Seed completed"
    );

    Ok(SeedSummary {
        admin_email: ADMIN_EMAIL.to_string(),
        admin_created,
        projects: created_projects,
        packages: created_packages,
    })
}

async fn ensure_admin(db: &DatabaseConnection) -> Result<bool, SeedError> {
    if users::find_user_by_email(db, ADMIN_EMAIL).await?.is_some() {
        return Ok(false);
    }

    let password_hash =
        tokio::task::spawn_blocking(|| password::hash_password(ADMIN_PASSWORD)).await??;

    users::insert_user(
        db,
        CreateUser {
            email: ADMIN_EMAIL.to_string(),
            name: Some(ADMIN_NAME.to_string()),
            password_hash,
            role: Roles::Admin,
        },
    )
    .await?;

    tracing::info!(email = ADMIN_EMAIL, "Admin user created");
    Ok(true)
}
