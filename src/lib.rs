//! PULSA - a press-and-hold greeting card for the terminal
//!
//! A fullscreen TUI that walks the viewer through a short choreography:
//! hold a press to fill a progress bar against escalating targets, watch
//! a staged message reveal, then tap once for the final greeting and a
//! confetti drop.

use std::fmt;

// Public re-exports
pub mod app;
pub mod card;
pub mod config;
pub mod demo;
pub mod util;

// Common error types
#[derive(Debug)]
pub enum PulsaError {
    /// I/O operation failed
    Io(std::io::Error),
    /// Configuration validation or parsing error
    Config(String),
    /// Terminal setup or rendering error
    Terminal(String),
}

impl fmt::Display for PulsaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PulsaError::Io(err) => write!(f, "I/O error: {}", err),
            PulsaError::Config(msg) => write!(f, "Configuration error: {}", msg),
            PulsaError::Terminal(msg) => write!(f, "Terminal error: {}", msg),
        }
    }
}

impl std::error::Error for PulsaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PulsaError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PulsaError {
    fn from(err: std::io::Error) -> Self {
        PulsaError::Io(err)
    }
}

impl From<toml::de::Error> for PulsaError {
    fn from(err: toml::de::Error) -> Self {
        PulsaError::Config(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for PulsaError {
    fn from(err: toml::ser::Error) -> Self {
        PulsaError::Config(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for pulsa operations
pub type Result<T> = std::result::Result<T, PulsaError>;

// Common types and constants
pub const APP_NAME: &str = "pulsa";
pub const CONFIG_FILE: &str = "pulsa.toml";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PulsaError::Config("no stages".to_string());
        assert_eq!(err.to_string(), "Configuration error: no stages");

        let err = PulsaError::Terminal("raw mode".to_string());
        assert_eq!(err.to_string(), "Terminal error: raw mode");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: PulsaError = io_err.into();
        assert!(matches!(err, PulsaError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("not [ valid").unwrap_err();
        let err: PulsaError = toml_err.into();
        assert!(matches!(err, PulsaError::Config(_)));
    }
}
