pub mod inquiries;
pub mod packages;
pub mod projects;
pub mod users;

use serde::{Deserialize, Deserializer};

/// Which rows a listing returns: public pages see active rows only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListFilter {
    pub active_only: bool,
}

impl ListFilter {
    pub fn public() -> Self {
        Self { active_only: true }
    }

    pub fn all() -> Self {
        Self { active_only: false }
    }
}

/// Deserialize a nullable column in an update body.
///
/// With `#[serde(default)]` an absent field stays `None`, while an explicit
/// `null` becomes `Some(None)` and clears the column.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
