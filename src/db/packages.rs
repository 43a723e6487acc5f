use sea_orm::*;
use uuid::Uuid;

use crate::features;
use crate::models::ListFilter;
use crate::models::packages::{self, CreatePackage, UpdatePackage};

/// Insert a new pricing package. `features` is stored in its encoded text form.
pub async fn insert_package(
    db: &DatabaseConnection,
    input: CreatePackage,
) -> Result<packages::Model, DbErr> {
    let now = chrono::Utc::now();
    let new_package = packages::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name: Set(input.name),
        name_en: Set(input.name_en),
        price: Set(input.price),
        description: Set(input.description),
        features: Set(input.features.as_ref().and_then(features::encode)),
        duration: Set(input.duration),
        is_popular: Set(input.is_popular.unwrap_or(false)),
        is_active: Set(input.is_active.unwrap_or(true)),
        sort_order: Set(input.sort_order.unwrap_or(0)),
        created_at: Set(now),
        updated_at: Set(now),
    };

    new_package.insert(db).await
}

/// Fetch packages in display order (`sort_order` ascending).
pub async fn list_packages(
    db: &DatabaseConnection,
    filter: ListFilter,
) -> Result<Vec<packages::Model>, DbErr> {
    let mut query = packages::Entity::find();
    if filter.active_only {
        query = query.filter(packages::Column::IsActive.eq(true));
    }

    query
        .order_by_asc(packages::Column::SortOrder)
        .order_by_asc(packages::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch a single package by ID.
pub async fn get_package_by_id(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Option<packages::Model>, DbErr> {
    packages::Entity::find_by_id(id.to_string()).one(db).await
}

/// Look up a package by its display name.
pub async fn find_package_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<packages::Model>, DbErr> {
    packages::Entity::find()
        .filter(packages::Column::Name.eq(name))
        .one(db)
        .await
}

/// Merge the supplied fields into an existing package.
///
/// An absent or `null` `features` leaves the stored list untouched.
pub async fn update_package(
    db: &DatabaseConnection,
    id: &str,
    input: UpdatePackage,
) -> Result<packages::Model, DbErr> {
    let package = get_package_by_id(db, id)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("Package {id} not found")))?;

    let mut active: packages::ActiveModel = package.into();

    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(name_en) = input.name_en {
        active.name_en = Set(name_en);
    }
    if let Some(price) = input.price {
        active.price = Set(price);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(value) = input.features {
        active.features = Set(features::encode(&value));
    }
    if let Some(duration) = input.duration {
        active.duration = Set(duration);
    }
    if let Some(is_popular) = input.is_popular {
        active.is_popular = Set(is_popular);
    }
    if let Some(is_active) = input.is_active {
        active.is_active = Set(is_active);
    }
    if let Some(sort_order) = input.sort_order {
        active.sort_order = Set(sort_order);
    }
    active.updated_at = Set(chrono::Utc::now());

    active.update(db).await
}

/// Delete a package by ID. Inquiries pointing at it keep a `NULL` package.
pub async fn delete_package(db: &DatabaseConnection, id: &str) -> Result<(), DbErr> {
    let result = packages::Entity::delete_by_id(id.to_string())
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(DbErr::RecordNotFound(format!("Package {id} not found")));
    }
    Ok(())
}

/// Count all packages.
pub async fn count_packages(db: &DatabaseConnection) -> Result<u64, DbErr> {
    packages::Entity::find().count(db).await
}
