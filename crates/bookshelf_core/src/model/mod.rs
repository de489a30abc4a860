//! Catalog domain model: books, categories and the categorizations that
//! link them.
//!
//! # Responsibility
//! - Define the persisted record shapes used by repositories and services.
//! - Define insert shapes that carry column defaults explicitly.
//!
//! # Invariants
//! - Every persisted record is identified by a database-assigned integer id.
//! - A `Categorization` is the only owner of the primary-flag fact for a
//!   (book, category) pairing.

pub mod book;
pub mod categorization;
pub mod category;
