// ABOUTME: Registry client for Nexus 3 docker repositories.
// ABOUTME: Search, manifest creation-time lookup, and digest-addressed deletes.

mod client;
mod error;
mod model;
mod nexus;

pub use client::{Collected, Registry, RegistryDeleter, SearchHit, SearchResults, SkippedHit, collect_images};
pub use error::{RegistryError, RegistryErrorKind};
pub use nexus::{MANIFEST_V2_MEDIA_TYPE, NexusClient};
