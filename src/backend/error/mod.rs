//! Backend Error Module
//!
//! Error types for the backend server and their conversion to HTTP
//! responses.

/// Error type definitions
pub mod types;

/// Conversion implementations (IntoResponse)
pub mod conversion;

/// Re-export the main error type
pub use types::BackendError;
