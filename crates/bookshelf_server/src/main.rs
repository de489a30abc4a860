//! Bookshelf server entry point.
//!
//! Reads configuration, initializes logging, opens (and by default
//! recreates) the catalog database, then serves the router until Ctrl-C.

use bookshelf_core::init_logging;
use bookshelf_server::{build_router, AppState, ServerConfig, ServerResult};
use log::{error, info};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_start module=server status=error error={err}");
            eprintln!("bookshelf_server: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> ServerResult<()> {
    let config = ServerConfig::from_env()?;
    init_logging(config.log_level, config.log_target.clone())?;

    let state = AppState::open(&config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(
        "event=server_start module=server status=ok addr={} database={:?} reset_schema={}",
        config.bind_addr, config.database, config.reset_schema
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("event=shutdown_signal module=server status=error error={err}");
    }
}
