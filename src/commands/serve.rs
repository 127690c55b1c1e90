//! Serve command - Starts the matchmaking HTTP API.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Cache, Database};

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    tracing::info!("Starting matchmaking API...");

    // Postgres holds the catalogs, accounts and matches
    let db = Arc::new(Database::connect(&config).await);
    tracing::info!("Database connected");

    // Redis backs rate limiting and the token denylist
    let cache = Arc::new(Cache::connect(&config).await);
    tracing::info!("Cache connected");

    let app_state = AppState::from_config(db, cache, config);
    let app = create_router(app_state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Matchmaking API listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
