// ABOUTME: Configuration loading for nexus-retention.
// ABOUTME: Reads the registry connection from a YAML file or the environment.

mod env_value;
mod registry;
mod retention;

pub use env_value::EnvValue;
pub use registry::{DEFAULT_API_VERSION, DEFAULT_TIMEOUT, RegistryConfig};
pub use retention::{RetentionConfig, resolve_policy};

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "nexus-retention.yml";
pub const CONFIG_FILENAME_ALT: &str = "nexus-retention.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".nexus-retention/config.yml";

pub const ENV_ADDRESS: &str = "NEXUS_ADDRESS";
pub const ENV_PORT: &str = "NEXUS_PORT";
pub const ENV_LOGIN: &str = "NEXUS_USER_LOGIN";
pub const ENV_PASSWORD: &str = "NEXUS_USER_PASSWORD";
pub const ENV_API_VERSION: &str = "NEXUS_API_VERSION";

/// Fully resolved configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub registry: RegistryConfig,
    /// Fallback policy when no policy flag is given.
    pub retention: Option<RetentionConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    registry: RegistrySection,
    #[serde(default)]
    retention: Option<RetentionConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistrySection {
    address: EnvValue,
    port: PortSetting,
    login: EnvValue,
    password: EnvValue,
    #[serde(default = "default_api_version")]
    api_version: String,
    #[serde(default = "default_timeout", with = "humantime_serde")]
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PortSetting {
    Number(u16),
    Value(EnvValue),
}

impl PortSetting {
    fn resolve(&self) -> Result<u16> {
        match self {
            PortSetting::Number(port) => Ok(*port),
            PortSetting::Value(value) => registry::parse_port(&value.resolve()?),
        }
    }
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let file: ConfigFile = serde_yaml::from_str(yaml)?;
        let section = file.registry;

        let port = section.port.resolve()?;
        let registry = RegistryConfig::new(
            &section.address.resolve()?,
            port,
            &section.login.resolve()?,
            &section.password.resolve()?,
        )?
        .api_version(&section.api_version)?
        .timeout(section.timeout);

        Ok(Config {
            registry,
            retention: file.retention,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load the first config file found in `dir`, if any.
    pub fn discover(dir: &Path) -> Result<Option<Self>> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                tracing::debug!(path = %path.display(), "using config file");
                return Self::load(path).map(Some);
            }
        }

        Ok(None)
    }

    /// Build the registry connection from `NEXUS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let address = required_env(ENV_ADDRESS)?;
        let port = registry::parse_port(&required_env(ENV_PORT)?)?;
        let login = required_env(ENV_LOGIN)?;
        let password = required_env(ENV_PASSWORD)?;

        let mut registry = RegistryConfig::new(&address, port, &login, &password)?;
        if let Ok(api_version) = std::env::var(ENV_API_VERSION) {
            registry = registry.api_version(&api_version)?;
        }

        Ok(Config {
            registry,
            retention: None,
        })
    }

    /// Explicit file, else a discovered file in `dir`, else the environment.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::discover(dir)? {
            Some(config) => Ok(config),
            None => Self::from_env(),
        }
    }
}

fn required_env(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| Error::MissingEnvVar(name.to_string()))
}
