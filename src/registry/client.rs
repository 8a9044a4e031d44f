// ABOUTME: Registry capability trait and the search-then-enrich pipeline.
// ABOUTME: Builds the complete descriptor list the retention engine ranks.

use super::RegistryError;
use crate::retention::{DeleteStatus, Deleter};
use crate::types::{Digest, ImageDescriptor, LocationRef, Selector};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use std::fmt;

/// A search result with everything needed to fetch metadata and delete it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub repository: String,
    pub name: String,
    pub version: String,
    /// Manifest URL for the tag, as reported by the registry.
    pub download_url: String,
    pub location: LocationRef,
    pub digest: Digest,
}

impl SearchHit {
    pub fn into_descriptor(self, created_at: DateTime<FixedOffset>) -> ImageDescriptor {
        ImageDescriptor {
            repository: self.repository,
            name: self.name,
            version: self.version,
            location: self.location,
            digest: self.digest,
            created_at,
        }
    }
}

impl fmt::Display for SearchHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}", self.repository, self.name, self.version)
    }
}

/// A search entry that could not be resolved and was left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedHit {
    pub repository: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
    pub reason: String,
}

impl fmt::Display for SkippedHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}:{}: {}",
            self.repository.as_deref().unwrap_or("?"),
            self.name.as_deref().unwrap_or("?"),
            self.version.as_deref().unwrap_or("?"),
            self.reason
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    pub hits: Vec<SearchHit>,
    pub skipped: Vec<SkippedHit>,
}

/// Registry operations the cleanup relies on.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Find every docker component matching the selector.
    ///
    /// Entries that cannot be resolved are reported in
    /// [`SearchResults::skipped`] instead of failing the search.
    async fn search(&self, selector: &Selector) -> Result<SearchResults, RegistryError>;

    /// Resolve the creation time recorded in the hit's manifest metadata.
    async fn fetch_creation_time(&self, hit: &SearchHit) -> Result<DateTime<FixedOffset>, RegistryError>;

    /// Delete the manifest with `digest` under `location`.
    async fn delete(&self, location: &LocationRef, digest: &Digest) -> DeleteStatus;
}

/// Descriptors for every resolvable hit, plus the hits that were skipped.
#[derive(Debug, Clone, Default)]
pub struct Collected {
    pub images: Vec<ImageDescriptor>,
    pub skipped: Vec<SkippedHit>,
}

/// Search, then fetch creation metadata for each hit, one call at a time.
///
/// Any metadata failure aborts: keep-count ranking needs the complete set.
pub async fn collect_images<R>(registry: &R, selector: &Selector) -> Result<Collected, RegistryError>
where
    R: Registry + ?Sized,
{
    let SearchResults { hits, skipped } = registry.search(selector).await?;
    tracing::info!(
        %selector,
        hits = hits.len(),
        skipped = skipped.len(),
        "search complete"
    );

    let mut images = Vec::with_capacity(hits.len());
    for hit in hits {
        let created_at = registry.fetch_creation_time(&hit).await?;
        tracing::debug!(image = %hit, %created_at, "resolved creation time");
        images.push(hit.into_descriptor(created_at));
    }

    Ok(Collected { images, skipped })
}

/// Routes engine deletes to a registry.
pub struct RegistryDeleter<'a, R: ?Sized>(pub &'a R);

#[async_trait]
impl<'a, R> Deleter for RegistryDeleter<'a, R>
where
    R: Registry + ?Sized,
{
    async fn delete(&self, image: &ImageDescriptor) -> DeleteStatus {
        self.0.delete(&image.location, &image.digest).await
    }
}
