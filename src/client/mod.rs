//! Blocking HTTP client for the search engine and its console.
//!
//! Both endpoints go through the [`Transport`] seam, so every typed
//! operation can be exercised without a network. Two "already done"
//! conditions are folded into [`Outcome`] instead of errors: creating a
//! resource that exists, and deleting one that does not.

pub mod bulk;
pub mod console;
pub mod search;
pub mod transport;

#[cfg(test)]
pub(crate) mod memory;

use serde_json::Value;
use thiserror::Error;

use crate::config::ConfigError;

pub use bulk::{BulkSummary, WriteMode};
pub use console::{AgentSummary, ConsoleClient, ConverseReply};
pub use search::SearchClient;
pub use transport::{
    ApiRequest, ApiResponse, HttpMethod, HttpTransport, MockTransport, RequestBody, Transport,
};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Cannot connect to {0}")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("Remote error ({status}): {body}")]
    Remote { status: u16, body: String },

    #[error("Bulk indexing errors ({total}): [{}]", .shown.join("; "))]
    BulkFailures { total: usize, shown: Vec<String> },

    #[error("Response parsing failed: {0}")]
    ResponseParsing(String),

    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Console endpoint not configured (set KIBANA_URL and KIBANA_API_KEY)")]
    ConsoleNotConfigured,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result of a create or delete call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The remote applied the change and returned this body.
    Applied(Value),
    /// Create found the resource already present.
    AlreadyExists,
    /// Delete found nothing to remove.
    NotFound,
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// Short human label for progress output.
    pub fn note(&self) -> &'static str {
        match self {
            Self::Applied(_) => "done",
            Self::AlreadyExists => "already exists",
            Self::NotFound => "not found",
        }
    }
}

/// Map a create response: "already exists" conditions become
/// [`Outcome::AlreadyExists`], other failures stay errors.
pub(crate) fn create_outcome(
    response: ApiResponse,
    conflict_means_exists: bool,
) -> Result<Outcome, ClientError> {
    if response.is_success() {
        return Ok(Outcome::Applied(response.json()?));
    }
    let exists = (response.status == 400 && response.body.contains("already_exists"))
        || (conflict_means_exists && response.status == 409);
    if exists {
        return Ok(Outcome::AlreadyExists);
    }
    Err(response.into_error())
}

/// Map a delete response: 404 becomes [`Outcome::NotFound`].
pub(crate) fn delete_outcome(response: ApiResponse) -> Result<Outcome, ClientError> {
    if response.is_success() {
        return Ok(Outcome::Applied(response.json()?));
    }
    if response.status == 404 {
        return Ok(Outcome::NotFound);
    }
    Err(response.into_error())
}

/// Body of a successful response, or the remote error unchanged.
pub(crate) fn expect_json(response: ApiResponse) -> Result<Value, ClientError> {
    if response.is_success() {
        response.json()
    } else {
        Err(response.into_error())
    }
}
