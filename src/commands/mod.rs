// ABOUTME: Command module aggregator for the nexus-retention CLI.
// ABOUTME: Re-exports the clean command handler.

mod clean;

pub use clean::clean;
