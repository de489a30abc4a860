//! Category record.

use serde::{Deserialize, Serialize};

/// Database-assigned category identifier.
pub type CategoryId = i64;

/// Persisted category row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: Option<String>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

/// Insert shape for a category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCategory {
    pub name: Option<String>,
}

impl NewCategory {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}
