//! Chat Handlers
//!
//! HTTP handlers for the chat endpoints: posting messages and serving the
//! generated per-channel pages and the log report.

/// POST handler for new messages
pub mod post;

/// GET handlers for generated pages
pub mod pages;

/// Re-export handlers for route configuration
pub use pages::{serve_channel_page, serve_default_chat_page, serve_index, serve_log_page};
pub use post::handle_chat_post;
