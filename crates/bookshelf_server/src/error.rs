//! Server error type and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bookshelf_core::db::DbError;
use bookshelf_core::{LoggingError, RepoError};
use log::error;
use thiserror::Error;

use crate::config::ConfigError;

pub type ServerResult<T> = Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Logging(#[from] LoggingError),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("database connection lock is poisoned")]
    ConnectionPoisoned,
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ServerError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "config_invalid",
            Self::Logging(_) => "logging_init_failed",
            Self::Db(_) => "db_error",
            Self::Repo(_) => "repo_error",
            Self::Io(_) => "io_error",
            Self::ConnectionPoisoned => "connection_poisoned",
            Self::Join(_) => "task_join_failed",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        error!(
            "event=http_error module=server status=error error_code={} error={}",
            self.error_code(),
            self
        );
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}
