//! Book record.

use serde::{Deserialize, Serialize};

/// Database-assigned book identifier.
pub type BookId = i64;

/// Persisted book row.
///
/// Names are neither required nor unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub name: Option<String>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

/// Insert shape for a book.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBook {
    pub name: Option<String>,
}

impl NewBook {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}
