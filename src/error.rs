//! Error types for supernet summarization.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while summarizing an address list.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SummarizeError {
    /// A token is neither a dotted-quad address nor a CIDR range.
    #[error("The entry '{0}' is not a valid IP address or CIDR range.")]
    InvalidAddressFormat(String),
}

/// Errors raised while building or loading a [`crate::SummarizerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid mask range /{min} - /{max}: need min <= max <= 30")]
    InvalidMaskRange { min: u8, max: u8 },

    #[error("Error reading config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value '{value}' for environment variable {key}")]
    InvalidEnv { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_address_message() {
        let e = SummarizeError::InvalidAddressFormat("10.0.0.1/33".to_string());
        assert_eq!(
            e.to_string(),
            "The entry '10.0.0.1/33' is not a valid IP address or CIDR range."
        );
    }

    #[test]
    fn test_mask_range_message() {
        let e = ConfigError::InvalidMaskRange { min: 24, max: 16 };
        assert_eq!(
            e.to_string(),
            "Invalid mask range /24 - /16: need min <= max <= 30"
        );
    }
}
