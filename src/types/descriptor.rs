// ABOUTME: Resolved image descriptor and the location handle used to delete it.
// ABOUTME: Built once per run from a search hit plus its manifest creation time.

use super::Digest;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseLocationError {
    #[error("download URL cannot be empty")]
    Empty,

    #[error("download URL has no path component: {0}")]
    NoPath(String),
}

/// Manifest base URL of an artifact, ending in `/`.
///
/// Derived from the asset download URL by dropping its final path segment
/// (the tag), so appending a digest addresses the manifest by content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LocationRef(String);

impl LocationRef {
    pub fn from_download_url(url: &str) -> Result<Self, ParseLocationError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ParseLocationError::Empty);
        }

        let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
        if !without_scheme.contains('/') {
            return Err(ParseLocationError::NoPath(url.to_string()));
        }

        match url.rfind('/') {
            Some(pos) => Ok(Self(url[..=pos].to_string())),
            None => Err(ParseLocationError::NoPath(url.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URL addressing the manifest with the given digest.
    pub fn manifest_url(&self, digest: &Digest) -> String {
        format!("{}{}", self.0, digest)
    }
}

impl fmt::Display for LocationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One artifact instance matched by a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageDescriptor {
    pub repository: String,
    pub name: String,
    pub version: String,
    pub location: LocationRef,
    pub digest: Digest,
    /// Creation time with the offset the registry reported it in.
    pub created_at: DateTime<FixedOffset>,
}

impl ImageDescriptor {
    /// Calendar date of creation as written in the timestamp; the only part
    /// compared against age cutoffs.
    pub fn created_on(&self) -> NaiveDate {
        self.created_at.date_naive()
    }
}

impl fmt::Display for ImageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}", self.repository, self.name, self.version)
    }
}
