use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::features;

/// SeaORM entity for the `packages` table (pricing tiers).
///
/// `features` holds one feature per line; clients only ever see the decoded
/// list through [`PackageResponse`].
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "packages")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub name_en: Option<String>,
    pub price: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub features: Option<String>,
    pub duration: Option<String>,
    pub is_popular: bool,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::inquiries::Entity")]
    Inquiries,
}

impl Related<super::inquiries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inquiries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// `features` accepts a list of strings or a raw newline-delimited string.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePackage {
    pub name: String,
    pub name_en: Option<String>,
    pub price: i32,
    pub description: Option<String>,
    pub features: Option<serde_json::Value>,
    pub duration: Option<String>,
    pub is_popular: Option<bool>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePackage {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub name_en: Option<Option<String>>,
    pub price: Option<i32>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub description: Option<Option<String>>,
    /// Absent or `null` leaves the stored list untouched.
    pub features: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub duration: Option<Option<String>>,
    pub is_popular: Option<bool>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

/// Wire representation of a package with `features` decoded to a list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageResponse {
    pub id: String,
    pub name: String,
    pub name_en: Option<String>,
    pub price: i32,
    pub description: Option<String>,
    pub features: Vec<String>,
    pub duration: Option<String>,
    pub is_popular: bool,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl From<Model> for PackageResponse {
    fn from(m: Model) -> Self {
        Self {
            features: features::decode(m.features.as_deref()),
            id: m.id,
            name: m.name,
            name_en: m.name_en,
            price: m.price,
            description: m.description,
            duration: m.duration,
            is_popular: m.is_popular,
            is_active: m.is_active,
            sort_order: m.sort_order,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
