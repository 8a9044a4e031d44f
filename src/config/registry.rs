// ABOUTME: Connection settings for the Nexus registry.
// ABOUTME: Endpoint, credentials, REST API version, and request timeout.

use crate::error::{Error, Result};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_API_VERSION: &str = "v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct RegistryConfig {
    /// Base address including scheme, e.g. `https://nexus.example.com`.
    pub address: String,
    pub port: u16,
    pub login: String,
    pub password: String,
    /// REST API path segment: `v1` on current Nexus 3, `beta` on older ones.
    pub api_version: String,
    pub timeout: Duration,
}

impl RegistryConfig {
    pub fn new(address: &str, port: u16, login: &str, password: &str) -> Result<Self> {
        let address = address.trim().trim_end_matches('/');
        if !(address.starts_with("http://") || address.starts_with("https://")) {
            return Err(Error::InvalidConfig(format!(
                "registry address must start with http:// or https://: {}",
                address
            )));
        }
        if login.is_empty() {
            return Err(Error::InvalidConfig("registry login cannot be empty".to_string()));
        }

        Ok(Self {
            address: address.to_string(),
            port,
            login: login.to_string(),
            password: password.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn api_version(mut self, api_version: &str) -> Result<Self> {
        let api_version = api_version.trim().trim_matches('/');
        if api_version.is_empty() || api_version.contains('/') {
            return Err(Error::InvalidConfig(format!(
                "invalid API version: {:?}",
                api_version
            )));
        }
        self.api_version = api_version.to_string();
        Ok(self)
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }

    pub fn search_url(&self) -> String {
        format!("{}/service/rest/{}/search", self.base_url(), self.api_version)
    }
}

pub(crate) fn parse_port(value: &str) -> Result<u16> {
    value
        .trim()
        .parse::<u16>()
        .map_err(|_| Error::InvalidConfig(format!("invalid port: {}", value)))
}

impl fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("address", &self.address)
            .field("port", &self.port)
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .finish()
    }
}
