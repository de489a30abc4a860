//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas required by core behavior.
//! - Trigger schema migrations (or a full recreate) before returning a
//!   usable connection.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Returned connections have migrations fully applied.

use super::migrations::{apply_migrations, recreate_schema};
use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SchemaLoad {
    Migrate,
    Recreate,
}

impl SchemaLoad {
    fn as_str(self) -> &'static str {
        match self {
            Self::Migrate => "migrate",
            Self::Recreate => "recreate",
        }
    }
}

/// Opens a SQLite database file and applies all pending migrations.
///
/// # Side effects
/// - Performs connection bootstrap and migration checks.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_file(path.as_ref(), SchemaLoad::Migrate)
}

/// Opens a SQLite database file and drops/recreates every catalog table.
///
/// Existing catalog rows are lost. Only meant for demo and test databases.
pub fn open_db_fresh(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_file(path.as_ref(), SchemaLoad::Recreate)
}

/// Opens an in-memory SQLite database and applies all pending migrations.
///
/// # Side effects
/// - Performs connection bootstrap and migration checks.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");

    let conn = match Connection::open_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=memory duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    finish_open(conn, "memory", SchemaLoad::Migrate, started_at)
}

fn open_file(path: &Path, load: SchemaLoad) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!(
        "event=db_open module=db status=start mode=file schema_load={}",
        load.as_str()
    );

    let conn = match Connection::open(path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=file duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    finish_open(conn, "file", load, started_at)
}

fn finish_open(
    mut conn: Connection,
    mode: &str,
    load: SchemaLoad,
    started_at: Instant,
) -> DbResult<Connection> {
    match bootstrap_connection(&mut conn, load) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} schema_load={} duration_ms={}",
                mode,
                load.as_str(),
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection, load: SchemaLoad) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    match load {
        SchemaLoad::Migrate => apply_migrations(conn),
        SchemaLoad::Recreate => recreate_schema(conn),
    }
}
