//! Error types for configuration loading.
//!
//! The simulation itself never fails: rejected placements and skipped
//! actions are reported through `Option`/`bool` results and tick counters.

use thiserror::Error;

/// Failure to obtain a usable [`AppConfig`](crate::config::AppConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File system errors
    #[error("Config file error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML syntax or type errors
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values that parse but fail validation
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    #[must_use]
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        Self::Invalid(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::invalid("width must be positive");
        assert_eq!(err.to_string(), "Invalid config: width must be positive");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ConfigError = io_err.into();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
