//! Book repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Create and read `books` rows.
//! - Traverse a book's categorizations and, through them, its categories.

use crate::model::book::{Book, BookId, NewBook};
use crate::model::categorization::{Categorization, CategorizationFilter};
use crate::model::category::{Category, CategoryId};
use crate::repo::categorization_repo::query_categorizations;
use crate::repo::category_repo::query_categories_through;
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};

const BOOK_SELECT_SQL: &str = "SELECT
    b.id AS id,
    b.name AS name,
    b.created_at AS created_at,
    b.updated_at AS updated_at
FROM books b";

/// Repository interface for books and their associations.
pub trait BookRepository {
    fn create_book(&self, book: &NewBook) -> RepoResult<Book>;
    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>>;
    fn list_books(&self) -> RepoResult<Vec<Book>>;
    /// Categorizations owned by the book, oldest first.
    fn categorizations_for_book(&self, id: BookId) -> RepoResult<Vec<Categorization>>;
    /// Categories reachable through the book's categorizations.
    fn categories_for_book(
        &self,
        id: BookId,
        filter: CategorizationFilter,
    ) -> RepoResult<Vec<Category>>;
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["books", "categorizations"])?;
        Ok(Self { conn })
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn create_book(&self, book: &NewBook) -> RepoResult<Book> {
        self.conn
            .execute("INSERT INTO books (name) VALUES (?1);", [book.name.as_deref()])?;
        let id = self.conn.last_insert_rowid();
        self.get_book(id)?
            .ok_or(RepoError::NotFound { entity: "book", id })
    }

    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE b.id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_book_row(row)?));
        }
        Ok(None)
    }

    fn list_books(&self) -> RepoResult<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} ORDER BY b.id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut books = Vec::new();
        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }
        Ok(books)
    }

    fn categorizations_for_book(&self, id: BookId) -> RepoResult<Vec<Categorization>> {
        query_categorizations(
            self.conn,
            CategorizationFilter::Any,
            Some(("cz.book_id", id)),
        )
    }

    fn categories_for_book(
        &self,
        id: BookId,
        filter: CategorizationFilter,
    ) -> RepoResult<Vec<Category>> {
        query_categories_through(self.conn, filter, Some(id))
    }
}

/// Lists books joined through categorizations of one category.
///
/// One element per matching join row, in categorization order.
pub(crate) fn query_books_through(
    conn: &Connection,
    filter: CategorizationFilter,
    category_id: CategoryId,
) -> RepoResult<Vec<Book>> {
    let mut sql = format!(
        "{BOOK_SELECT_SQL}
         INNER JOIN categorizations cz ON cz.book_id = b.id
         WHERE cz.category_id = ?"
    );
    let bind_values = vec![Value::Integer(category_id)];
    if let Some(condition) = filter.sql_condition("cz") {
        sql.push_str(" AND ");
        sql.push_str(&condition);
    }
    sql.push_str(" ORDER BY cz.id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params_from_iter(bind_values))?;
    let mut books = Vec::new();
    while let Some(row) = rows.next()? {
        books.push(parse_book_row(row)?);
    }
    Ok(books)
}

pub(crate) fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    Ok(Book {
        id: row.get("id")?,
        name: row.get("name")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
