//! Categorization join record.
//!
//! # Invariants
//! - Links exactly one book to exactly one category.
//! - `primary` is never null and defaults to `false`.

use super::book::BookId;
use super::category::CategoryId;
use serde::{Deserialize, Serialize};

/// Database-assigned categorization identifier.
pub type CategorizationId = i64;

/// Persisted join row between a book and a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Categorization {
    pub id: CategorizationId,
    pub book_id: BookId,
    pub category_id: CategoryId,
    /// Whether this category is a primary category of the book.
    pub primary: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

/// Insert shape for a categorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCategorization {
    pub book_id: BookId,
    pub category_id: CategoryId,
    pub primary: bool,
}

impl NewCategorization {
    /// Links a book to a category as a secondary (non-primary) pairing.
    pub fn new(book_id: BookId, category_id: CategoryId) -> Self {
        Self {
            book_id,
            category_id,
            primary: false,
        }
    }

    /// Sets the primary flag.
    pub fn primary(mut self, primary: bool) -> Self {
        self.primary = primary;
        self
    }
}

/// Predicate on the `primary` flag used by join queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategorizationFilter {
    /// Every categorization regardless of flag.
    #[default]
    Any,
    /// Only rows with `primary = true`.
    Primary,
    /// Only rows with `primary = false`.
    Secondary,
}

impl CategorizationFilter {
    /// SQL condition over a categorizations table alias, or `None` for `Any`.
    pub(crate) fn sql_condition(self, alias: &str) -> Option<String> {
        match self {
            Self::Any => None,
            Self::Primary => Some(format!("{alias}.\"primary\" = 1")),
            Self::Secondary => Some(format!("{alias}.\"primary\" = 0")),
        }
    }

    /// Whether a categorization with the given flag satisfies this filter.
    pub fn matches(self, primary: bool) -> bool {
        match self {
            Self::Any => true,
            Self::Primary => primary,
            Self::Secondary => !primary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CategorizationFilter, NewCategorization};

    #[test]
    fn new_categorization_defaults_to_secondary() {
        let link = NewCategorization::new(1, 2);
        assert!(!link.primary);
        assert!(link.primary(true).primary);
    }

    #[test]
    fn filter_conditions_target_quoted_primary_column() {
        assert_eq!(CategorizationFilter::Any.sql_condition("c"), None);
        assert_eq!(
            CategorizationFilter::Primary.sql_condition("c").as_deref(),
            Some("c.\"primary\" = 1")
        );
        assert!(CategorizationFilter::Secondary.matches(false));
        assert!(!CategorizationFilter::Primary.matches(false));
    }
}
