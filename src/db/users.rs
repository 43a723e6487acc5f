use sea_orm::*;
use uuid::Uuid;

use crate::models::users::{self, CreateUser};

/// Find a user by exact (case-sensitive) email.
pub async fn find_user_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await
}

/// Fetch a single user by ID.
pub async fn get_user_by_id(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find_by_id(id.to_string()).one(db).await
}

/// Insert a user whose password has already been hashed.
pub async fn insert_user(
    db: &DatabaseConnection,
    input: CreateUser,
) -> Result<users::Model, DbErr> {
    let now = chrono::Utc::now();
    let new_user = users::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        email: Set(input.email),
        name: Set(input.name),
        password: Set(input.password_hash),
        role: Set(input.role),
        created_at: Set(now),
        updated_at: Set(now),
    };

    new_user.insert(db).await
}
