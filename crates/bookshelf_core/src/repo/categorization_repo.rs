//! Categorization repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist book/category links together with their primary flag.
//! - Filter links by the primary flag.
//!
//! # Invariants
//! - A link is only written when both referenced rows exist.
//! - `primaries` returns exactly the rows with `"primary" = 1`.

use crate::model::categorization::{
    Categorization, CategorizationFilter, CategorizationId, NewCategorization,
};
use crate::repo::{
    bool_to_int, ensure_connection_ready, int_to_bool, row_exists, RepoError, RepoResult,
};
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const CATEGORIZATION_SELECT_SQL: &str = "SELECT
    cz.id AS id,
    cz.book_id AS book_id,
    cz.category_id AS category_id,
    cz.\"primary\" AS \"primary\",
    cz.created_at AS created_at,
    cz.updated_at AS updated_at
FROM categorizations cz";

/// Repository interface for the book/category join entity.
pub trait CategorizationRepository {
    fn create_categorization(&self, link: &NewCategorization) -> RepoResult<Categorization>;
    fn get_categorization(&self, id: CategorizationId) -> RepoResult<Option<Categorization>>;
    fn list_categorizations(&self, filter: CategorizationFilter)
        -> RepoResult<Vec<Categorization>>;
    /// Rows with `primary = true`, oldest first.
    fn primaries(&self) -> RepoResult<Vec<Categorization>>;
}

/// SQLite-backed categorization repository.
pub struct SqliteCategorizationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategorizationRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["books", "categories", "categorizations"])?;
        Ok(Self { conn })
    }
}

impl CategorizationRepository for SqliteCategorizationRepository<'_> {
    fn create_categorization(&self, link: &NewCategorization) -> RepoResult<Categorization> {
        if !row_exists(self.conn, "books", link.book_id)? {
            return Err(RepoError::NotFound {
                entity: "book",
                id: link.book_id,
            });
        }
        if !row_exists(self.conn, "categories", link.category_id)? {
            return Err(RepoError::NotFound {
                entity: "category",
                id: link.category_id,
            });
        }

        self.conn.execute(
            "INSERT INTO categorizations (book_id, category_id, \"primary\")
             VALUES (?1, ?2, ?3);",
            params![link.book_id, link.category_id, bool_to_int(link.primary)],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(
            "event=categorization_create module=repo status=ok id={} book_id={} category_id={} primary={}",
            id, link.book_id, link.category_id, link.primary
        );

        self.get_categorization(id)?.ok_or(RepoError::NotFound {
            entity: "categorization",
            id,
        })
    }

    fn get_categorization(&self, id: CategorizationId) -> RepoResult<Option<Categorization>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CATEGORIZATION_SELECT_SQL} WHERE cz.id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_categorization_row(row)?));
        }
        Ok(None)
    }

    fn list_categorizations(
        &self,
        filter: CategorizationFilter,
    ) -> RepoResult<Vec<Categorization>> {
        query_categorizations(self.conn, filter, None)
    }

    fn primaries(&self) -> RepoResult<Vec<Categorization>> {
        query_categorizations(self.conn, CategorizationFilter::Primary, None)
    }
}

/// Lists categorizations matching `filter`, optionally narrowed by one
/// foreign-key column (`cz.book_id` or `cz.category_id`).
pub(crate) fn query_categorizations(
    conn: &Connection,
    filter: CategorizationFilter,
    owner: Option<(&'static str, i64)>,
) -> RepoResult<Vec<Categorization>> {
    let mut sql = format!("{CATEGORIZATION_SELECT_SQL} WHERE 1 = 1");
    let mut bind_values: Vec<Value> = Vec::new();

    if let Some(condition) = filter.sql_condition("cz") {
        sql.push_str(" AND ");
        sql.push_str(&condition);
    }

    if let Some((column, id)) = owner {
        sql.push_str(&format!(" AND {column} = ?"));
        bind_values.push(Value::Integer(id));
    }

    sql.push_str(" ORDER BY cz.id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params_from_iter(bind_values))?;
    let mut links = Vec::new();
    while let Some(row) = rows.next()? {
        links.push(parse_categorization_row(row)?);
    }
    Ok(links)
}

pub(crate) fn parse_categorization_row(row: &Row<'_>) -> RepoResult<Categorization> {
    let primary = int_to_bool(row.get("primary")?, "categorizations.primary")?;
    let book_id: Option<i64> = row.get("book_id")?;
    let category_id: Option<i64> = row.get("category_id")?;
    let id: i64 = row.get("id")?;

    let book_id = book_id.ok_or_else(|| {
        RepoError::InvalidData(format!("categorization {id} has no book_id"))
    })?;
    let category_id = category_id.ok_or_else(|| {
        RepoError::InvalidData(format!("categorization {id} has no category_id"))
    })?;

    Ok(Categorization {
        id,
        book_id,
        category_id,
        primary,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
