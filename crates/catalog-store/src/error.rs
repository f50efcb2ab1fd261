//! # Store Error Types
//!
//! Errors raised while wiring the stores together.
//!
//! Store operations themselves never return request failures: those become
//! error toasts. What remains is configuration and construction.

use catalog_client::ClientError;
use thiserror::Error;

/// Result type alias for store setup operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store setup error.
#[derive(Debug, Error)]
pub enum StoreError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration values are out of range.
    #[error("Invalid catalog configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read or parse the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to write the config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Service Errors
    // =========================================================================
    /// The product service could not be built.
    #[error("Product service error: {0}")]
    Client(#[from] ClientError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::ConfigSaveFailed(err.to_string())
    }
}

impl StoreError {
    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            StoreError::InvalidConfig(_)
                | StoreError::ConfigLoadFailed(_)
                | StoreError::ConfigSaveFailed(_)
                | StoreError::Client(ClientError::InvalidConfig(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_error_converts_to_load_failure() {
        let err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let store_err: StoreError = err.into();
        assert!(matches!(store_err, StoreError::ConfigLoadFailed(_)));
        assert!(store_err.is_config_error());
    }

    #[test]
    fn test_client_error_wraps() {
        let err: StoreError = ClientError::InvalidConfig("bad url".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Product service error: Invalid client configuration: bad url"
        );
        assert!(err.is_config_error());
    }
}
