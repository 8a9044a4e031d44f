// ABOUTME: Scripted in-memory Registry for driving cleanups without HTTP.
// ABOUTME: Records every metadata fetch and delete in call order.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use nexus_retention::registry::{Registry, RegistryError, SearchHit, SearchResults, SkippedHit};
use nexus_retention::retention::DeleteStatus;
use nexus_retention::types::{Digest, ImageDescriptor, LocationRef, Selector};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeRegistry {
    images: Vec<ImageDescriptor>,
    skipped: Vec<SkippedHit>,
    search_status: Option<u16>,
    broken_metadata: Option<String>,
    delete_statuses: HashMap<Digest, DeleteStatus>,
    searches: Mutex<Vec<Selector>>,
    fetches: Mutex<Vec<String>>,
    deletes: Mutex<Vec<String>>,
}

impl FakeRegistry {
    pub fn with_images(images: Vec<ImageDescriptor>) -> Self {
        Self {
            images,
            ..Default::default()
        }
    }

    pub fn skipping(mut self, skipped: SkippedHit) -> Self {
        self.skipped.push(skipped);
        self
    }

    /// Make the search itself fail with an HTTP status.
    pub fn failing_search(mut self, status: u16) -> Self {
        self.search_status = Some(status);
        self
    }

    /// Make the metadata fetch fail for the image with this version.
    pub fn broken_metadata_for(mut self, version: &str) -> Self {
        self.broken_metadata = Some(version.to_string());
        self
    }

    pub fn delete_returns(mut self, image: &ImageDescriptor, status: DeleteStatus) -> Self {
        self.delete_statuses.insert(image.digest.clone(), status);
        self
    }

    pub fn searches(&self) -> Vec<Selector> {
        self.searches.lock().unwrap().clone()
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetches.lock().unwrap().clone()
    }

    /// Versions deleted, in call order.
    pub fn deleted(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }
}

#[async_trait]
impl Registry for FakeRegistry {
    async fn search(&self, selector: &Selector) -> Result<SearchResults, RegistryError> {
        self.searches.lock().unwrap().push(selector.clone());

        if let Some(status) = self.search_status {
            return Err(RegistryError::Status {
                url: "http://nexus.test:8081/service/rest/v1/search".to_string(),
                status,
            });
        }

        let hits = self
            .images
            .iter()
            .map(|image| SearchHit {
                repository: image.repository.clone(),
                name: image.name.clone(),
                version: image.version.clone(),
                download_url: format!("{}{}", image.location, image.version),
                location: image.location.clone(),
                digest: image.digest.clone(),
            })
            .collect();

        Ok(SearchResults {
            hits,
            skipped: self.skipped.clone(),
        })
    }

    async fn fetch_creation_time(&self, hit: &SearchHit) -> Result<DateTime<FixedOffset>, RegistryError> {
        self.fetches.lock().unwrap().push(hit.version.clone());

        if self.broken_metadata.as_deref() == Some(hit.version.as_str()) {
            return Err(RegistryError::MissingField {
                url: hit.download_url.clone(),
                field: "history[0].v1Compatibility",
            });
        }

        self.images
            .iter()
            .find(|image| image.digest == hit.digest)
            .map(|image| image.created_at)
            .ok_or_else(|| RegistryError::Status {
                url: hit.download_url.clone(),
                status: 404,
            })
    }

    async fn delete(&self, _location: &LocationRef, digest: &Digest) -> DeleteStatus {
        let version = self
            .images
            .iter()
            .find(|image| &image.digest == digest)
            .map(|image| image.version.clone())
            .unwrap_or_else(|| digest.to_string());
        self.deletes.lock().unwrap().push(version);

        self.delete_statuses
            .get(digest)
            .cloned()
            .unwrap_or(DeleteStatus::Http(202))
    }
}
