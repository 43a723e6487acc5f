use sea_orm::*;
use uuid::Uuid;

use crate::models::ListFilter;
use crate::models::projects::{self, CreateProject, UpdateProject};

/// Insert a new portfolio project.
pub async fn insert_project(
    db: &DatabaseConnection,
    input: CreateProject,
) -> Result<projects::Model, DbErr> {
    let now = chrono::Utc::now();
    let new_project = projects::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        title: Set(input.title),
        category: Set(input.category),
        description: Set(input.description),
        desktop_image: Set(input.desktop_image),
        mobile_image: Set(input.mobile_image),
        website_url: Set(input.website_url),
        sort_order: Set(input.sort_order.unwrap_or(0)),
        is_active: Set(input.is_active.unwrap_or(true)),
        created_at: Set(now),
        updated_at: Set(now),
    };

    new_project.insert(db).await
}

/// Fetch projects in display order (`sort_order` ascending).
pub async fn list_projects(
    db: &DatabaseConnection,
    filter: ListFilter,
) -> Result<Vec<projects::Model>, DbErr> {
    let mut query = projects::Entity::find();
    if filter.active_only {
        query = query.filter(projects::Column::IsActive.eq(true));
    }

    query
        .order_by_asc(projects::Column::SortOrder)
        .order_by_asc(projects::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch a single project by ID.
pub async fn get_project_by_id(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Option<projects::Model>, DbErr> {
    projects::Entity::find_by_id(id.to_string()).one(db).await
}

/// Look up a project by its exact title.
pub async fn find_project_by_title(
    db: &DatabaseConnection,
    title: &str,
) -> Result<Option<projects::Model>, DbErr> {
    projects::Entity::find()
        .filter(projects::Column::Title.eq(title))
        .one(db)
        .await
}

/// Merge the supplied fields into an existing project. An explicit `null`
/// clears a nullable column.
pub async fn update_project(
    db: &DatabaseConnection,
    id: &str,
    input: UpdateProject,
) -> Result<projects::Model, DbErr> {
    let project = get_project_by_id(db, id)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("Project {id} not found")))?;

    let mut active: projects::ActiveModel = project.into();

    if let Some(title) = input.title {
        active.title = Set(title);
    }
    if let Some(category) = input.category {
        active.category = Set(category);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(desktop_image) = input.desktop_image {
        active.desktop_image = Set(desktop_image);
    }
    if let Some(mobile_image) = input.mobile_image {
        active.mobile_image = Set(mobile_image);
    }
    if let Some(website_url) = input.website_url {
        active.website_url = Set(website_url);
    }
    if let Some(sort_order) = input.sort_order {
        active.sort_order = Set(sort_order);
    }
    if let Some(is_active) = input.is_active {
        active.is_active = Set(is_active);
    }
    active.updated_at = Set(chrono::Utc::now());

    active.update(db).await
}

/// Delete a project by ID. A missing row is reported as `RecordNotFound`.
pub async fn delete_project(db: &DatabaseConnection, id: &str) -> Result<(), DbErr> {
    let result = projects::Entity::delete_by_id(id.to_string())
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(DbErr::RecordNotFound(format!("Project {id} not found")));
    }
    Ok(())
}

/// Count all projects.
pub async fn count_projects(db: &DatabaseConnection) -> Result<u64, DbErr> {
    projects::Entity::find().count(db).await
}
