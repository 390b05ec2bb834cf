//! Corkboard - Main Library
//!
//! Corkboard is a small self-hosted chat/bulletin endpoint built on Axum.
//! Messages are posted over HTTP (JSON or form bodies), persisted as plain
//! files under a per-channel directory, and the per-channel HTML pages are
//! regenerated on demand by external templating scripts discovered under the
//! content root.
//!
//! # Module Structure
//!
//! The library is organized into two main modules:
//!
//! - **`shared`** - Types and pure logic used across the crate
//!   - Message structures and the incoming post payload
//!   - Channel-name validation and input sanitization
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server setup, configuration, and routing
//!   - File-backed message store and best-effort git commit helper
//!   - External script discovery/invocation and artifact freshness policy
//!   - Static file serving with template-directory fallback
//!
//! # Usage
//!
//! ```rust,no_run
//! use corkboard::backend::server::config::ServerConfig;
//! use corkboard::backend::server::init::create_app;
//!
//! # async fn example() {
//! let config = ServerConfig::from_env();
//! let app = create_app(config).await;
//! // Use app with Axum server
//! # }
//! ```
//!
//! # Concurrency Model
//!
//! There is no shared mutable in-memory state between requests. The only
//! cross-request state is the read-only [`backend::server::config::ServerConfig`]
//! captured in `AppState` at startup; all coordination happens through the
//! filesystem. Concurrent regenerations of the same artifact can race (both
//! requests see a stale page and both rebuild it); the rebuild is a full
//! rewrite from the same inputs, so last-write-wins is harmless.
//!
//! # Error Handling
//!
//! - `Result<T, E>` for fallible operations, propagated with `?`
//! - The backend error taxonomy lives in `backend::error`
//! - Best-effort side effects (git commits, script runs) return `Result`s
//!   that callers log and drop rather than fail the request

/// Shared types and pure validation logic
pub mod shared;

/// Backend server-side code
pub mod backend;
