//! Category repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Create, read and look up `categories` rows by name.
//! - Traverse a category's categorizations and, through them, its books.
//! - Answer the primary-category query.
//!
//! # Invariants
//! - `primaries` is an inner join against `categorizations` filtered by
//!   `"primary" = 1`. A category with several primary categorizations
//!   appears once per join row; the result is not deduplicated.
//! - `count_primaries` counts the same join rows, so it always equals
//!   `primaries().len()`.

use crate::model::book::{Book, BookId};
use crate::model::categorization::{Categorization, CategorizationFilter};
use crate::model::category::{Category, CategoryId, NewCategory};
use crate::repo::book_repo::query_books_through;
use crate::repo::categorization_repo::query_categorizations;
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};

const CATEGORY_SELECT_SQL: &str = "SELECT
    c.id AS id,
    c.name AS name,
    c.created_at AS created_at,
    c.updated_at AS updated_at
FROM categories c";

/// Repository interface for categories and their associations.
pub trait CategoryRepository {
    fn create_category(&self, category: &NewCategory) -> RepoResult<Category>;
    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>>;
    /// First category with exactly this name (lowest id).
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Category>>;
    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    fn categorizations_for_category(&self, id: CategoryId) -> RepoResult<Vec<Categorization>>;
    /// Books reachable through the category's categorizations.
    fn books_for_category(
        &self,
        id: CategoryId,
        filter: CategorizationFilter,
    ) -> RepoResult<Vec<Book>>;
    /// Categories joined to at least one primary categorization, one element
    /// per join row.
    fn primaries(&self) -> RepoResult<Vec<Category>>;
    /// Number of join rows `primaries` would return.
    fn count_primaries(&self) -> RepoResult<u64>;
}

/// SQLite-backed category repository.
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["categories", "categorizations"])?;
        Ok(Self { conn })
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn create_category(&self, category: &NewCategory) -> RepoResult<Category> {
        self.conn.execute(
            "INSERT INTO categories (name) VALUES (?1);",
            [category.name.as_deref()],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_category(id)?.ok_or(RepoError::NotFound {
            entity: "category",
            id,
        })
    }

    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CATEGORY_SELECT_SQL} WHERE c.id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_category_row(row)?));
        }
        Ok(None)
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Option<Category>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CATEGORY_SELECT_SQL} WHERE c.name = ?1 ORDER BY c.id ASC LIMIT 1;"
        ))?;
        let mut rows = stmt.query([name])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_category_row(row)?));
        }
        Ok(None)
    }

    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CATEGORY_SELECT_SQL} ORDER BY c.id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }
        Ok(categories)
    }

    fn categorizations_for_category(&self, id: CategoryId) -> RepoResult<Vec<Categorization>> {
        query_categorizations(
            self.conn,
            CategorizationFilter::Any,
            Some(("cz.category_id", id)),
        )
    }

    fn books_for_category(
        &self,
        id: CategoryId,
        filter: CategorizationFilter,
    ) -> RepoResult<Vec<Book>> {
        query_books_through(self.conn, filter, id)
    }

    fn primaries(&self) -> RepoResult<Vec<Category>> {
        query_categories_through(self.conn, CategorizationFilter::Primary, None)
    }

    fn count_primaries(&self) -> RepoResult<u64> {
        count_categories_through(self.conn, CategorizationFilter::Primary)
    }
}

/// Lists categories joined through categorizations matching `filter`,
/// optionally restricted to one book.
///
/// One element per matching join row, in categorization order.
pub(crate) fn query_categories_through(
    conn: &Connection,
    filter: CategorizationFilter,
    book_id: Option<BookId>,
) -> RepoResult<Vec<Category>> {
    let mut sql = format!(
        "{CATEGORY_SELECT_SQL}
         INNER JOIN categorizations cz ON cz.category_id = c.id
         WHERE 1 = 1"
    );
    let mut bind_values: Vec<Value> = Vec::new();

    if let Some(condition) = filter.sql_condition("cz") {
        sql.push_str(" AND ");
        sql.push_str(&condition);
    }

    if let Some(book_id) = book_id {
        sql.push_str(" AND cz.book_id = ?");
        bind_values.push(Value::Integer(book_id));
    }

    sql.push_str(" ORDER BY cz.id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params_from_iter(bind_values))?;
    let mut categories = Vec::new();
    while let Some(row) = rows.next()? {
        categories.push(parse_category_row(row)?);
    }
    Ok(categories)
}

fn count_categories_through(conn: &Connection, filter: CategorizationFilter) -> RepoResult<u64> {
    let mut sql = String::from(
        "SELECT COUNT(*)
         FROM categories c
         INNER JOIN categorizations cz ON cz.category_id = c.id",
    );
    if let Some(condition) = filter.sql_condition("cz") {
        sql.push_str(" WHERE ");
        sql.push_str(&condition);
    }

    let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
    u64::try_from(count)
        .map_err(|_| RepoError::InvalidData(format!("negative join count `{count}`")))
}

pub(crate) fn parse_category_row(row: &Row<'_>) -> RepoResult<Category> {
    Ok(Category {
        id: row.get("id")?,
        name: row.get("name")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
