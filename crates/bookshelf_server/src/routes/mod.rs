//! HTTP routes.

pub mod primary_categories;
