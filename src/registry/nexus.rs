// ABOUTME: Nexus 3 implementation of the Registry trait over reqwest.
// ABOUTME: Paginated search, schema 1/2 creation-time lookup, manifest deletes.

use super::client::{Registry, SearchHit, SearchResults};
use super::error::{
    BlobLocationSnafu, ClientSnafu, DecodeSnafu, InvalidTimestampSnafu, MissingFieldSnafu,
    PaginationCycleSnafu, RequestSnafu, StatusSnafu,
};
use super::model::{ImageConfig, Manifest, SearchPage};
use super::RegistryError;
use crate::config::RegistryConfig;
use crate::retention::DeleteStatus;
use crate::types::{Digest, LocationRef, Selector};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use snafu::{OptionExt, ResultExt, ensure};
use std::collections::HashSet;

/// Media type requested when deleting, so Nexus resolves schema 2 digests.
pub const MANIFEST_V2_MEDIA_TYPE: &str = "application/vnd.docker.distribution.manifest.v2+json";

const USER_AGENT: &str = concat!("nexus-retention/", env!("CARGO_PKG_VERSION"));

/// Registry client for a single Nexus instance.
pub struct NexusClient {
    http: reqwest::Client,
    search_url: String,
    login: String,
    password: String,
}

impl std::fmt::Debug for NexusClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NexusClient")
            .field("search_url", &self.search_url)
            .field("login", &self.login)
            .finish()
    }
}

impl NexusClient {
    pub fn new(config: &RegistryConfig) -> Result<Self, RegistryError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .context(ClientSnafu)?;

        Ok(Self {
            http,
            search_url: config.search_url(),
            login: config.login.clone(),
            password: config.password.clone(),
        })
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.http
            .get(url)
            .basic_auth(&self.login, Some(&self.password))
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<T, RegistryError> {
        tracing::debug!(url, "GET");
        let response = request.send().await.context(RequestSnafu { url })?;

        let status = response.status();
        ensure!(
            status.is_success(),
            StatusSnafu {
                url,
                status: status.as_u16()
            }
        );

        let body = response.bytes().await.context(RequestSnafu { url })?;
        serde_json::from_slice(&body).context(DecodeSnafu { url })
    }

    async fn fetch_config_created(
        &self,
        hit: &SearchHit,
        config_digest: &str,
    ) -> Result<String, RegistryError> {
        let url = blob_url(&hit.download_url, config_digest)?;
        let config: ImageConfig = self.fetch_json(self.get(&url), &url).await?;
        config.created.context(MissingFieldSnafu {
            url,
            field: "config created",
        })
    }
}

#[async_trait]
impl Registry for NexusClient {
    async fn search(&self, selector: &Selector) -> Result<SearchResults, RegistryError> {
        let mut results = SearchResults::default();
        let mut token: Option<String> = None;
        let mut seen: HashSet<String> = HashSet::new();

        loop {
            let mut request = self.get(&self.search_url).query(&selector.query_params());
            if let Some(ref token) = token {
                request = request.query(&[("continuationToken", token.as_str())]);
            }

            let page: SearchPage = self.fetch_json(request, &self.search_url).await?;

            for component in page.items {
                match component.into_hit() {
                    Ok(hit) => results.hits.push(hit),
                    Err(skipped) => {
                        tracing::warn!(entry = %skipped, "skipping unresolvable search entry");
                        results.skipped.push(skipped);
                    }
                }
            }

            match page.continuation_token {
                Some(next) if !next.is_empty() => {
                    // Each token is handed out at most once
                    ensure!(
                        seen.insert(next.clone()),
                        PaginationCycleSnafu {
                            url: self.search_url.as_str(),
                            token: next,
                        }
                    );
                    token = Some(next);
                }
                _ => break,
            }
        }

        Ok(results)
    }

    async fn fetch_creation_time(
        &self,
        hit: &SearchHit,
    ) -> Result<DateTime<FixedOffset>, RegistryError> {
        let url = hit.download_url.as_str();
        let manifest: Manifest = self.fetch_json(self.get(url), url).await?;

        let created = if let Some(entry) = manifest.history.first() {
            let v1 = entry
                .v1_compatibility
                .as_deref()
                .context(MissingFieldSnafu {
                    url,
                    field: "history[0].v1Compatibility",
                })?;
            let config: ImageConfig = serde_json::from_str(v1).context(DecodeSnafu { url })?;
            config.created.context(MissingFieldSnafu {
                url,
                field: "history[0].v1Compatibility.created",
            })?
        } else if let Some(ref config) = manifest.config {
            self.fetch_config_created(hit, &config.digest).await?
        } else {
            return MissingFieldSnafu {
                url,
                field: "history or config",
            }
            .fail();
        };

        parse_created(&created).context(InvalidTimestampSnafu {
            url,
            value: created.clone(),
        })
    }

    async fn delete(&self, location: &LocationRef, digest: &Digest) -> DeleteStatus {
        let url = location.manifest_url(digest);
        tracing::debug!(url = %url, "DELETE");

        match self
            .http
            .delete(&url)
            .basic_auth(&self.login, Some(&self.password))
            .header(ACCEPT, MANIFEST_V2_MEDIA_TYPE)
            .send()
            .await
        {
            Ok(response) => DeleteStatus::Http(response.status().as_u16()),
            Err(e) => DeleteStatus::Transport(e.to_string()),
        }
    }
}

/// Config blob URL for a manifest URL of the form `.../v2/<name>/manifests/<ref>`.
fn blob_url(manifest_url: &str, digest: &str) -> Result<String, RegistryError> {
    let (prefix, _) = manifest_url
        .rsplit_once("/manifests/")
        .context(BlobLocationSnafu { url: manifest_url })?;
    Ok(format!("{}/blobs/{}", prefix, digest))
}

/// Docker creation timestamps are RFC 3339; some old images omit the offset,
/// which is then read as UTC. The reported offset is kept so the calendar
/// date matches the one written in the timestamp.
fn parse_created(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).ok().or_else(|| {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc().fixed_offset())
    })
}
