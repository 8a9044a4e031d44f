// ABOUTME: Wire types for the Nexus search API and docker manifests.
// ABOUTME: Fields are optional so one malformed entry can be skipped, not fatal.

use super::client::{SearchHit, SkippedHit};
use crate::types::{Digest, LocationRef};
use serde::Deserialize;

/// One page of `GET /service/rest/v1/search`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchPage {
    #[serde(default)]
    pub items: Vec<Component>,
    #[serde(default)]
    pub continuation_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Component {
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Asset {
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub checksum: Option<Checksum>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Checksum {
    #[serde(default)]
    pub sha256: Option<String>,
}

impl Component {
    /// Resolve the first asset into a search hit, or explain why it cannot be.
    pub fn into_hit(self) -> Result<SearchHit, SkippedHit> {
        let Component {
            repository,
            name,
            version,
            assets,
        } = self;

        let skip = |reason: String| SkippedHit {
            repository: repository.clone(),
            name: name.clone(),
            version: version.clone(),
            reason,
        };

        let (Some(repo), Some(image_name), Some(tag)) = (&repository, &name, &version) else {
            return Err(skip("missing repository, name or version".to_string()));
        };

        let Some(asset) = assets.into_iter().next() else {
            return Err(skip("no assets".to_string()));
        };

        let Some(download_url) = asset.download_url else {
            return Err(skip("asset has no downloadUrl".to_string()));
        };

        let location = LocationRef::from_download_url(&download_url)
            .map_err(|e| skip(e.to_string()))?;

        let Some(sha256) = asset.checksum.and_then(|c| c.sha256) else {
            return Err(skip("asset has no sha256 checksum".to_string()));
        };

        let digest = Digest::parse(&sha256).map_err(|e| skip(e.to_string()))?;

        Ok(SearchHit {
            repository: repo.clone(),
            name: image_name.clone(),
            version: tag.clone(),
            download_url,
            location,
            digest,
        })
    }
}

/// A docker manifest as served for a tag; schema 1 or schema 2.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Manifest {
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub config: Option<ConfigDescriptor>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryEntry {
    #[serde(rename = "v1Compatibility", default)]
    pub v1_compatibility: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConfigDescriptor {
    pub digest: String,
}

/// The subset of an image config (or v1 compatibility blob) we read.
#[derive(Debug, Deserialize)]
pub(crate) struct ImageConfig {
    #[serde(default)]
    pub created: Option<String>,
}
