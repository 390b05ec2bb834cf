//! Backend Module
//!
//! This module contains all server-side code for the Corkboard application.
//! It provides an Axum HTTP server that serves static files, renders plain
//! text as HTML, and implements the file-backed chat/bulletin endpoints.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`chat`** - Message posting, file-backed store, git commit helper
//! - **`render`** - External script discovery/invocation and the artifact
//!   freshness policy that gates regeneration
//! - **`static_files`** - Static file serving with template-directory
//!   fallback, text-as-HTML rendering, startup asset setup
//! - **`error`** - Backend-specific error types
//!
//! # State Management
//!
//! `AppState` holds only the read-only server configuration (content root,
//! TTLs); there is no shared mutable in-memory state between requests. All
//! coordination happens through the filesystem, which is also what makes the
//! external templating scripts able to observe every message the server has
//! accepted.
//!
//! # Error Handling
//!
//! Handlers return `Result<Response, BackendError>`; the error type maps to
//! HTTP status codes in `error::conversion`. Best-effort side effects (git
//! commits, script invocations) return `Result`s that callers log and drop.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Chat posting and the file-backed message store
pub mod chat;

/// Generated-page rendering: script discovery, invocation, freshness
pub mod render;

/// Static file serving with template fallback
pub mod static_files;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::init::create_app;
