// ABOUTME: Registry error types with SNAFU pattern.
// ABOUTME: Any of these during search or metadata fetch aborts the run.

use snafu::Snafu;

/// Failure talking to the registry or understanding its answer.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum RegistryError {
    #[snafu(display("failed to build HTTP client: {source}"))]
    Client { source: reqwest::Error },

    #[snafu(display("request to {url} failed: {source}"))]
    Request { url: String, source: reqwest::Error },

    #[snafu(display("{url} returned HTTP {status}"))]
    Status { url: String, status: u16 },

    #[snafu(display("invalid JSON from {url}: {source}"))]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    #[snafu(display("{url} is missing {field}"))]
    MissingField { url: String, field: &'static str },

    #[snafu(display("invalid creation time {value:?} from {url}"))]
    InvalidTimestamp { url: String, value: String },

    #[snafu(display("cannot derive blob location from manifest URL {url}"))]
    BlobLocation { url: String },

    #[snafu(display("{url} returned continuation token {token:?} twice"))]
    PaginationCycle { url: String, token: String },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryErrorKind {
    /// The HTTP client could not be constructed.
    ClientSetup,
    /// No response: connection refused, DNS failure, timeout.
    Unreachable,
    /// Credentials were rejected.
    Unauthorized,
    /// The registry answered with an unexpected status.
    HttpStatus,
    /// The registry answered but the payload was not usable.
    MalformedResponse,
}

impl RegistryError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> RegistryErrorKind {
        match self {
            RegistryError::Client { .. } => RegistryErrorKind::ClientSetup,
            RegistryError::Request { .. } => RegistryErrorKind::Unreachable,
            RegistryError::Status {
                status: 401 | 403, ..
            } => RegistryErrorKind::Unauthorized,
            RegistryError::Status { .. } => RegistryErrorKind::HttpStatus,
            RegistryError::Decode { .. }
            | RegistryError::MissingField { .. }
            | RegistryError::InvalidTimestamp { .. }
            | RegistryError::BlobLocation { .. }
            | RegistryError::PaginationCycle { .. } => RegistryErrorKind::MalformedResponse,
        }
    }
}
