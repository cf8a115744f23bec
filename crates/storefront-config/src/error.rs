//! # Config Error Types

use storefront_core::ValidationError;
use thiserror::Error;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Everything that can go wrong loading or saving `pricing.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {}", .0.display())]
    NotFound(std::path::PathBuf),

    /// Failed to read or write the config file.
    #[error("Config file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for this schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be rendered back to TOML.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value parsed but breaks a rule (e.g. a zero exchange rate).
    #[error("Invalid pricing configuration: {0}")]
    Invalid(#[from] ValidationError),

    /// No explicit path and no platform config directory.
    #[error("No config path available")]
    NoConfigPath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_message_is_wrapped() {
        let err: ConfigError = ValidationError::MustBePositive {
            field: "rates.PLN".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Invalid pricing configuration: rates.PLN must be positive"
        );
    }

    #[test]
    fn test_not_found_names_the_path() {
        let err = ConfigError::NotFound("/etc/storefront/pricing.toml".into());
        assert_eq!(
            err.to_string(),
            "Config file not found: /etc/storefront/pricing.toml"
        );
    }
}
