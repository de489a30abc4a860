//! Core domain logic for the bookshelf catalog.
//! This crate owns the schema, the book/category association and the
//! primary-category query.

pub mod db;
pub mod fixtures;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogTarget, LoggingError};
pub use model::book::{Book, BookId, NewBook};
pub use model::categorization::{
    Categorization, CategorizationFilter, CategorizationId, NewCategorization,
};
pub use model::category::{Category, CategoryId, NewCategory};
pub use repo::book_repo::{BookRepository, SqliteBookRepository};
pub use repo::categorization_repo::{CategorizationRepository, SqliteCategorizationRepository};
pub use repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
pub use repo::{RepoError, RepoResult};
pub use service::catalog_service::CatalogService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
