//! Category Records

use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    pagination::{SortField, UnknownSortField},
    uuids::TypedUuid,
};

/// Category UUID
pub type CategoryUuid = TypedUuid<CategoryRecord>;

/// Category Record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub uuid: CategoryUuid,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields a category listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySortField {
    Uuid,
    Name,
}

impl SortField for CategorySortField {
    fn column(self) -> &'static str {
        match self {
            Self::Uuid => "c.uuid",
            Self::Name => "c.name",
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Uuid => "uuid",
            Self::Name => "name",
        }
    }
}

impl FromStr for CategorySortField {
    type Err = UnknownSortField;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "uuid" | "category_id" | "categoryId" => Ok(Self::Uuid),
            "name" | "category_name" | "categoryName" => Ok(Self::Name),
            other => Err(UnknownSortField(other.to_string())),
        }
    }
}
