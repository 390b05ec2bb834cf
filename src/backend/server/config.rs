/**
 * Server Configuration
 *
 * This module loads server configuration from environment variables, with
 * sensible defaults for local development.
 *
 * # Configuration Sources
 *
 * - `SERVER_PORT` - TCP port to listen on (default: 3000)
 * - `CORKBOARD_ROOT` - content root directory served and written by the
 *   application (default: current directory)
 * - `CORKBOARD_PAGE_TTL_SECS` - how long a generated page stays fresh
 *   before a GET triggers regeneration (default: 60)
 * - `CORKBOARD_SCRIPT_TIMEOUT_SECS` - hard cap on a single external
 *   script invocation (default: 30)
 *
 * # Error Handling
 *
 * Configuration errors are logged but never prevent startup: an unparsable
 * value falls back to its default with a warning.
 */

use std::path::PathBuf;
use std::time::Duration;

/// Default freshness window for generated pages, in seconds.
const DEFAULT_PAGE_TTL_SECS: u64 = 60;

/// Default upper bound on a single script invocation, in seconds.
const DEFAULT_SCRIPT_TIMEOUT_SECS: u64 = 30;

/// Immutable server configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Content root: static files, `message/`, `template/`, and generated
    /// artifacts all live under this directory
    pub root: PathBuf,
    /// TCP port the server binds to
    pub port: u16,
    /// Generated pages older than this are considered stale
    pub page_ttl: Duration,
    /// External scripts are killed after this long
    pub script_timeout: Duration,
}

impl ServerConfig {
    /// Load configuration from the environment.
    ///
    /// Missing or malformed variables fall back to defaults with a logged
    /// warning; this function never fails.
    pub fn from_env() -> Self {
        let root = std::env::var("CORKBOARD_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                tracing::debug!("CORKBOARD_ROOT not set, serving current directory");
                PathBuf::from(".")
            });

        Self {
            root,
            port: read_parsed("SERVER_PORT", 3000),
            page_ttl: Duration::from_secs(read_parsed(
                "CORKBOARD_PAGE_TTL_SECS",
                DEFAULT_PAGE_TTL_SECS,
            )),
            script_timeout: Duration::from_secs(read_parsed(
                "CORKBOARD_SCRIPT_TIMEOUT_SECS",
                DEFAULT_SCRIPT_TIMEOUT_SECS,
            )),
        }
    }

    /// Configuration for tests and embedding: given root, defaults elsewhere.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            port: 0,
            page_ttl: Duration::from_secs(DEFAULT_PAGE_TTL_SECS),
            script_timeout: Duration::from_secs(DEFAULT_SCRIPT_TIMEOUT_SECS),
        }
    }
}

/// Read an environment variable and parse it, falling back to `default` on
/// absence or parse failure.
fn read_parsed<T: std::str::FromStr + std::fmt::Display + Copy>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(
                "{} has unparsable value {:?}, falling back to {}",
                name,
                raw,
                default
            );
            default
        }),
        Err(_) => default,
    }
}
