/**
 * Application State
 *
 * This module defines the state shared across all request handlers.
 *
 * Corkboard deliberately keeps no mutable in-memory state: messages live on
 * disk, generated pages live on disk, and freshness is judged from file
 * mtimes. The only thing handlers share is the read-only configuration, so
 * `AppState` is a cheap clone of an `Arc`.
 */

use std::path::Path;
use std::sync::Arc;

use crate::backend::server::config::ServerConfig;

/// State shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Read-only server configuration, set once at startup
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Wrap a configuration into shareable state.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// The content root every relative path resolves against.
    pub fn root(&self) -> &Path {
        &self.config.root
    }
}
