//! Catalog use-case service.
//!
//! # Responsibility
//! - Answer primary-category questions for callers such as the HTTP layer.
//! - Own the plain-text rendering of the primary-category summary.
//!
//! # Invariants
//! - Every call reads current persisted state through the repository.
//! - The summary count is the join cardinality, not a distinct count.

use crate::model::category::Category;
use crate::repo::category_repo::CategoryRepository;
use crate::repo::RepoResult;

const SUMMARY_PREFIX: &str = "# of primary categories: ";

/// Use-case service for primary-category queries.
pub struct CatalogService<R: CategoryRepository> {
    repo: R,
}

impl<R: CategoryRepository> CatalogService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists categories joined to a primary categorization.
    pub fn primary_categories(&self) -> RepoResult<Vec<Category>> {
        self.repo.primaries()
    }

    /// Counts categories joined to a primary categorization.
    pub fn primary_category_count(&self) -> RepoResult<u64> {
        self.repo.count_primaries()
    }

    /// Renders `# of primary categories: N`.
    pub fn primary_categories_summary(&self) -> RepoResult<String> {
        let count = self.primary_category_count()?;
        Ok(render_summary(count))
    }
}

/// Formats the summary line for a given count.
pub fn render_summary(count: u64) -> String {
    format!("{SUMMARY_PREFIX}{count}")
}

#[cfg(test)]
mod tests {
    use super::render_summary;

    #[test]
    fn summary_uses_decimal_count() {
        assert_eq!(render_summary(0), "# of primary categories: 0");
        assert_eq!(render_summary(12), "# of primary categories: 12");
    }
}
