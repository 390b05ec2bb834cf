//! Shared Module
//!
//! This module contains types and pure logic used by both the HTTP layer and
//! the file-backed message store. Nothing in here touches the filesystem or
//! the network, which keeps the validation rules trivially testable.

/// Message data structures
pub mod message;

/// Channel-name validation and input sanitization
pub mod validate;

/// Re-export commonly used types for convenience
pub use message::{IncomingMessage, Message};
pub use validate::{is_valid_channel_name, sanitize, ValidationError};
