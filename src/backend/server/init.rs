/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server.
 *
 * # Initialization Process
 *
 * 1. One-time static asset setup: create `css/` and `js/` under the content
 *    root and copy defaults from `template/css/` and `template/js/`
 * 2. Build the shared application state
 * 3. Create and configure the router
 *
 * The asset setup runs here, once, before the first request is accepted;
 * request handlers never initialize anything. Setup failures are logged and
 * do not prevent startup: a root without templates simply serves whatever
 * is already there.
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;
use crate::backend::static_files::setup_static_files;

/// Create and configure the Axum application.
///
/// # Arguments
///
/// * `config` - Server configuration (content root, TTLs)
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub async fn create_app(config: ServerConfig) -> Router<()> {
    tracing::info!(
        "Initializing Corkboard server, content root {}",
        config.root.display()
    );

    if let Err(e) = setup_static_files(&config.root).await {
        tracing::warn!("Static asset setup failed (continuing): {}", e);
    }

    let state = AppState::new(config);
    let app = create_router(state);

    tracing::info!("Router configured");

    app
}
