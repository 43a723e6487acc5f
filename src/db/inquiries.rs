use sea_orm::*;
use uuid::Uuid;

use crate::models::inquiries::{self, CreateInquiry, Status, UpdateInquiry};

/// Insert a contact-form inquiry. Status always starts as `New`.
pub async fn insert_inquiry(
    db: &DatabaseConnection,
    input: CreateInquiry,
) -> Result<inquiries::Model, DbErr> {
    let now = chrono::Utc::now();
    let new_inquiry = inquiries::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name: Set(input.name),
        email: Set(input.email),
        phone: Set(input.phone),
        company: Set(input.company),
        // The contact form posts "" when no package was picked.
        package_id: Set(input.package_id.filter(|id| !id.trim().is_empty())),
        message: Set(input.message),
        status: Set(Status::New),
        created_at: Set(now),
        updated_at: Set(now),
    };

    new_inquiry.insert(db).await
}

/// Fetch all inquiries, newest first.
pub async fn list_inquiries(db: &DatabaseConnection) -> Result<Vec<inquiries::Model>, DbErr> {
    inquiries::Entity::find()
        .order_by_desc(inquiries::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch a single inquiry by ID.
pub async fn get_inquiry_by_id(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Option<inquiries::Model>, DbErr> {
    inquiries::Entity::find_by_id(id.to_string()).one(db).await
}

/// Merge the supplied fields into an existing inquiry. Status changes are
/// not constrained to any particular order.
pub async fn update_inquiry(
    db: &DatabaseConnection,
    id: &str,
    input: UpdateInquiry,
) -> Result<inquiries::Model, DbErr> {
    let inquiry = get_inquiry_by_id(db, id)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("Inquiry {id} not found")))?;

    let mut active: inquiries::ActiveModel = inquiry.into();

    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(email) = input.email {
        active.email = Set(email);
    }
    if let Some(phone) = input.phone {
        active.phone = Set(phone);
    }
    if let Some(company) = input.company {
        active.company = Set(company);
    }
    if let Some(package_id) = input.package_id {
        active.package_id = Set(package_id.filter(|id| !id.trim().is_empty()));
    }
    if let Some(message) = input.message {
        active.message = Set(message);
    }
    if let Some(status) = input.status {
        active.status = Set(status);
    }
    active.updated_at = Set(chrono::Utc::now());

    active.update(db).await
}

/// Delete an inquiry by ID. A missing row is reported as `RecordNotFound`.
pub async fn delete_inquiry(db: &DatabaseConnection, id: &str) -> Result<(), DbErr> {
    let result = inquiries::Entity::delete_by_id(id.to_string())
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(DbErr::RecordNotFound(format!("Inquiry {id} not found")));
    }
    Ok(())
}

/// Count inquiries, optionally only those with the given status.
pub async fn count_inquiries(
    db: &DatabaseConnection,
    status: Option<Status>,
) -> Result<u64, DbErr> {
    let mut query = inquiries::Entity::find();
    if let Some(status) = status {
        query = query.filter(inquiries::Column::Status.eq(status));
    }
    query.count(db).await
}
