//! Test-data factories for the catalog.
//!
//! # Responsibility
//! - Build a persisted `Book` with zero or more categorizations.
//! - Build the fixed-name categories the book traits attach.
//!
//! # Invariants
//! - Each trait creates a brand-new category row; categories are never
//!   reused between traits or between books.
//! - Traits apply in the order they were requested, after the book exists.

use crate::model::book::{Book, NewBook};
use crate::model::categorization::{Categorization, NewCategorization};
use crate::model::category::{Category, NewCategory};
use crate::repo::book_repo::{BookRepository, SqliteBookRepository};
use crate::repo::categorization_repo::{CategorizationRepository, SqliteCategorizationRepository};
use crate::repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
use crate::repo::RepoResult;
use rusqlite::Connection;

pub const DEFAULT_BOOK_NAME: &str = "Thing Explainer: Complicated Stuff in Simple Words";
pub const SCIENCE_CATEGORY_NAME: &str = "Science & Scientists";
pub const FUN_FACTS_CATEGORY_NAME: &str = "Trivia & Fun Facts";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BookTrait {
    PrimaryCategory,
    SecondaryCategory,
}

/// Builder for a persisted book plus optional categorizations.
#[derive(Debug, Clone)]
pub struct BookFactory {
    name: Option<String>,
    traits: Vec<BookTrait>,
}

/// Result of [`BookFactory::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedBook {
    pub book: Book,
    /// Categorizations attached by traits, in trait order.
    pub categorizations: Vec<Categorization>,
}

impl Default for BookFactory {
    fn default() -> Self {
        Self {
            name: Some(DEFAULT_BOOK_NAME.to_string()),
            traits: Vec::new(),
        }
    }
}

impl BookFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attaches a new science category as a primary categorization.
    pub fn with_primary_category(mut self) -> Self {
        self.traits.push(BookTrait::PrimaryCategory);
        self
    }

    /// Attaches a new fun-facts category as a secondary categorization.
    pub fn with_secondary_category(mut self) -> Self {
        self.traits.push(BookTrait::SecondaryCategory);
        self
    }

    /// Inserts the book, then applies each trait in order.
    pub fn create(&self, conn: &Connection) -> RepoResult<CreatedBook> {
        let books = SqliteBookRepository::try_new(conn)?;
        let links = SqliteCategorizationRepository::try_new(conn)?;

        let book = books.create_book(&NewBook {
            name: self.name.clone(),
        })?;

        let mut categorizations = Vec::with_capacity(self.traits.len());
        for book_trait in &self.traits {
            let (category, primary) = match book_trait {
                BookTrait::PrimaryCategory => (create_science_category(conn)?, true),
                BookTrait::SecondaryCategory => (create_fun_facts_category(conn)?, false),
            };
            let link = NewCategorization::new(book.id, category.id).primary(primary);
            categorizations.push(links.create_categorization(&link)?);
        }

        Ok(CreatedBook {
            book,
            categorizations,
        })
    }
}

/// Inserts a `Science & Scientists` category.
pub fn create_science_category(conn: &Connection) -> RepoResult<Category> {
    SqliteCategoryRepository::try_new(conn)?
        .create_category(&NewCategory::named(SCIENCE_CATEGORY_NAME))
}

/// Inserts a `Trivia & Fun Facts` category.
pub fn create_fun_facts_category(conn: &Connection) -> RepoResult<Category> {
    SqliteCategoryRepository::try_new(conn)?
        .create_category(&NewCategory::named(FUN_FACTS_CATEGORY_NAME))
}
