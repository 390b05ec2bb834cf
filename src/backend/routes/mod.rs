//! Routes Module
//!
//! Router assembly for the application.

/// Main router creation
pub mod router;

/// Re-export for convenience
pub use router::create_router;
