//! Error types and handling for the `Gridcast` report engine

use thiserror::Error;

/// Main error type for the `Gridcast` application
#[derive(Error, Debug)]
pub enum GridcastError {
    /// The forecast document violates the input contract. A malformed
    /// location fails the whole report build; a partial report would be
    /// misleading.
    #[error("Malformed input: {message}")]
    MalformedInput { message: String },

    /// Configuration value outside its documented bounds
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Sunrise/sunset lookup failed (e.g. invalid coordinates)
    #[error("Astronomy error: {message}")]
    Astronomy { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Forecast document parsing errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl GridcastError {
    /// Create a new malformed-input error
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new astronomy error
    pub fn astronomy<S: Into<String>>(message: S) -> Self {
        Self::Astronomy {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            GridcastError::MalformedInput { message } => {
                format!("The forecast document is malformed: {message}")
            }
            GridcastError::Config { message } => {
                format!("Configuration error: {message}")
            }
            GridcastError::Astronomy { .. } => {
                "Sunrise/sunset lookup failed for a location.".to_string()
            }
            GridcastError::Io { .. } => {
                "File operation failed. Please check the forecast directory.".to_string()
            }
            GridcastError::Json { .. } => {
                "The forecast document could not be parsed as JSON.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let malformed = GridcastError::malformed("missing grid points");
        assert!(matches!(malformed, GridcastError::MalformedInput { .. }));

        let config_err = GridcastError::config("maxRows out of bounds");
        assert!(matches!(config_err, GridcastError::Config { .. }));

        let astro_err = GridcastError::astronomy("invalid coordinates");
        assert!(matches!(astro_err, GridcastError::Astronomy { .. }));
    }

    #[test]
    fn test_user_messages() {
        let malformed = GridcastError::malformed("location Oakdale: expected 4 grid points");
        assert!(malformed.user_message().contains("Oakdale"));

        let config_err = GridcastError::config("maxRows must be between 1 and 208");
        assert!(config_err.user_message().contains("maxRows"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let gridcast_err: GridcastError = io_err.into();
        assert!(matches!(gridcast_err, GridcastError::Io { .. }));
    }
}
