// ABOUTME: Library root for nexus-retention - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod cleanup;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod output;
pub mod registry;
pub mod retention;
pub mod types;
