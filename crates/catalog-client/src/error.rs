//! # Client Error Types
//!
//! Failures of the product service.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │    Transport    │  │       Response          │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Request        │  │  Status (non-2xx)       │ │
//! │  │  MissingId      │  │  (connect,      │  │  Decode (bad JSON)      │ │
//! │  │                 │  │   timeout)      │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  The stores treat Transport and Response errors alike: a failed        │
//! │  request becomes an error toast.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for product service calls.
pub type ClientResult<T> = Result<T, ClientError>;

/// Product service error.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Client could not be built from its configuration.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// An update was requested for a product that has no id.
    #[error("Cannot update a product without an id")]
    MissingId,

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request never produced a response (connect, TLS, timeout).
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // =========================================================================
    // Response Errors
    // =========================================================================
    /// The server answered with a non-success status.
    #[error("Request to {url} returned status {status}")]
    Status { status: u16, url: String },

    /// The response body did not match the expected shape.
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// True for failures of an issued request.
    ///
    /// Configuration mistakes are reported separately since retrying the
    /// same call can never succeed.
    pub fn is_request_failed(&self) -> bool {
        !matches!(self, ClientError::InvalidConfig(_) | ClientError::MissingId)
    }

    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
