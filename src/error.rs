// ABOUTME: Application-wide error types for nexus-retention.
// ABOUTME: Uses thiserror; each variant maps onto a distinct process exit code.

use crate::registry::RegistryError;
use crate::retention::PolicyError;
use crate::types::SelectorError;
use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const DELETION_FAILED: i32 = 1;
    pub const CONFIGURATION: i32 = 2;
    pub const REGISTRY_UNAVAILABLE: i32 = 3;
    pub const NOTHING_MATCHED: i32 = 4;
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error("invalid selector: {0}")]
    Selector(#[from] SelectorError),

    #[error("registry unavailable: {0}")]
    Registry(#[from] RegistryError),

    #[error("no images match {0}")]
    NothingMatched(String),

    #[error("{failed} of {attempted} deletion(s) failed")]
    DeletionFailed { failed: usize, attempted: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::ConfigNotFound(_)
            | Error::MissingEnvVar(_)
            | Error::InvalidConfig(_)
            | Error::Policy(_)
            | Error::Selector(_)
            | Error::Io(_)
            | Error::Yaml(_) => exit_code::CONFIGURATION,
            Error::Registry(_) => exit_code::REGISTRY_UNAVAILABLE,
            Error::NothingMatched(_) => exit_code::NOTHING_MATCHED,
            Error::DeletionFailed { .. } => exit_code::DELETION_FAILED,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
