//! `GET /primary_categories` - count of primary categories as plain text.

use axum::extract::State;
use bookshelf_core::{CatalogService, SqliteCategoryRepository};
use log::debug;

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Renders `# of primary categories: N`.
///
/// `N` is the number of category/categorization join rows with the primary
/// flag set, read fresh from the database on every request.
pub async fn index(State(state): State<AppState>) -> ServerResult<String> {
    let db = state.db.clone();
    let summary = tokio::task::spawn_blocking(move || -> ServerResult<String> {
        let conn = db.lock().map_err(|_| ServerError::ConnectionPoisoned)?;
        let service = CatalogService::new(SqliteCategoryRepository::try_new(&conn)?);
        Ok(service.primary_categories_summary()?)
    })
    .await??;

    debug!("event=primary_categories_index module=server status=ok summary=\"{summary}\"");
    Ok(summary)
}
