// ABOUTME: Search selector for repository, image name, and tag filters.
// ABOUTME: Each filter is optional; an absent filter matches everything.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectorError {
    #[error("{0} filter cannot be blank")]
    Blank(&'static str),
}

/// Immutable query applied at search time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    repository: Option<String>,
    name: Option<String>,
    version: Option<String>,
}

impl Selector {
    /// A selector matching every docker image in every repository.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn repository(mut self, repository: &str) -> Result<Self, SelectorError> {
        self.repository = Some(non_blank("repository", repository)?);
        Ok(self)
    }

    pub fn name(mut self, name: &str) -> Result<Self, SelectorError> {
        self.name = Some(non_blank("image", name)?);
        Ok(self)
    }

    pub fn version(mut self, version: &str) -> Result<Self, SelectorError> {
        self.version = Some(non_blank("tag", version)?);
        Ok(self)
    }

    pub fn repository_filter(&self) -> Option<&str> {
        self.repository.as_deref()
    }

    pub fn name_filter(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn version_filter(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Query parameters for the Nexus search endpoint, in a fixed order.
    pub fn query_params(&self) -> Vec<(&'static str, &str)> {
        let mut params = vec![("format", "docker")];
        if let Some(ref repository) = self.repository {
            params.push(("repository", repository));
        }
        if let Some(ref name) = self.name {
            params.push(("name", name));
        }
        if let Some(ref version) = self.version {
            params.push(("version", version));
        }
        params
    }
}

fn non_blank(field: &'static str, value: &str) -> Result<String, SelectorError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(SelectorError::Blank(field));
    }
    Ok(value.to_string())
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}:{}",
            self.repository.as_deref().unwrap_or("*"),
            self.name.as_deref().unwrap_or("*"),
            self.version.as_deref().unwrap_or("*")
        )
    }
}
