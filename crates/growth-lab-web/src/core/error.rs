//! Error types for landing configuration and preference storage.

use thiserror::Error;

/// Primary error type for configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Field contained an invalid value.
    #[error("invalid configuration field")]
    InvalidField {
        /// Section that failed validation.
        section: &'static str,
        /// Field that failed validation.
        field: &'static str,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
    /// Embedded configuration payload was not valid JSON for the schema.
    #[error("failed to parse landing configuration")]
    Parse {
        /// Underlying parser error.
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    pub(crate) const fn invalid(
        section: &'static str,
        field: &'static str,
        reason: &'static str,
    ) -> Self {
        Self::InvalidField {
            section,
            field,
            reason,
        }
    }
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// A preference could not be written to browser storage.
#[derive(Debug, Error)]
#[error("failed to persist `{key}`")]
pub struct StorageError {
    /// Storage key that rejected the write.
    pub key: String,
    /// Backend detail reported by the browser.
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn parse_error_keeps_source() {
        let source = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = ConfigError::Parse { source };
        assert_eq!(err.to_string(), "failed to parse landing configuration");
        assert!(err.source().is_some());
    }

    #[test]
    fn invalid_field_carries_location() {
        let err = ConfigError::invalid("carousel", "interval_ms", "must_be_positive");
        match err {
            ConfigError::InvalidField {
                section,
                field,
                reason,
            } => {
                assert_eq!(section, "carousel");
                assert_eq!(field, "interval_ms");
                assert_eq!(reason, "must_be_positive");
            }
            ConfigError::Parse { .. } => panic!("unexpected variant"),
        }
    }

    #[test]
    fn storage_error_names_the_key() {
        let err = StorageError {
            key: "theme".to_string(),
            detail: "QuotaExceededError".to_string(),
        };
        assert_eq!(err.to_string(), "failed to persist `theme`");
    }
}
