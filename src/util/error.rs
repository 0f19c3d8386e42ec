//! Error types for the light lister.

use thiserror::Error;

/// Main error type for light lister operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Icon file exists but could not be decoded
    #[error("Cannot decode icon {name}: {reason}")]
    IconDecode { name: String, reason: String },

    /// Light path not present in the scene
    #[error("Light not found: {0}")]
    LightNotFound(String),

    /// Save or reload requested with no preset file attached
    #[error("No preset file: use Save As or Load first")]
    NoPresetPath,

    /// Host cannot perform the requested operation
    #[error("Unsupported by scene host: {0}")]
    Unsupported(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed preset or scene description
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an "other" error from a string.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create an icon decode error.
    pub fn decode(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::IconDecode {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for light lister operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::decode("cross.svg", "bad xml");
        assert!(e.to_string().contains("cross.svg"));
        assert!(e.to_string().contains("bad xml"));

        let e = Error::LightNotFound("|grp|keyLight".into());
        assert!(e.to_string().contains("|grp|keyLight"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
