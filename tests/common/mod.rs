//! Shared test fixtures
//!
//! Helpers for integration tests: building throwaway content roots and
//! test servers against them.

pub mod site;

pub use site::TestSite;
