//! Error types for damagedetect.
//!
//! This module defines all error types used throughout the damagedetect crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for damagedetect operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Feed Errors ===
    /// A status payload file could not be read.
    #[error("failed to read status payload {path}: {source}")]
    FeedRead {
        /// Path to the payload file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A status payload file did not match the record shape.
    #[error("malformed status payload {path}: {source}")]
    FeedDecode {
        /// Path to the payload file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The status feed is unavailable.
    #[error("status feed '{feed}' unavailable: {message}")]
    FeedUnavailable {
        /// Name of the feed.
        feed: &'static str,
        /// Description of what went wrong.
        message: String,
    },

    // === Server Errors ===
    /// Failed to bind the HTTP listener.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address that couldn't be bound.
        addr: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Frame Errors ===
    /// Frame dimensions or buffers are inconsistent.
    #[error("invalid frame: {message}")]
    FrameGeometry {
        /// Description of the inconsistency.
        message: String,
    },

    // === I/O Errors ===
    /// File system or socket operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for damagedetect operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a frame geometry error.
    #[must_use]
    pub fn frame_geometry(message: impl Into<String>) -> Self {
        Self::FrameGeometry {
            message: message.into(),
        }
    }

    /// Create a feed unavailable error.
    #[must_use]
    pub fn feed_unavailable(feed: &'static str, message: impl Into<String>) -> Self {
        Self::FeedUnavailable {
            feed,
            message: message.into(),
        }
    }

    /// Check if this error came from a status feed.
    #[must_use]
    pub fn is_feed_error(&self) -> bool {
        matches!(
            self,
            Self::FeedRead { .. } | Self::FeedDecode { .. } | Self::FeedUnavailable { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_geometry_error() {
        let err = Error::frame_geometry("expected 12 bytes, got 10");
        assert_eq!(err.to_string(), "invalid frame: expected 12 bytes, got 10");
    }

    #[test]
    fn test_feed_unavailable_error() {
        let err = Error::feed_unavailable("mock", "offline");
        let msg = err.to_string();
        assert!(msg.contains("mock"));
        assert!(msg.contains("offline"));
        assert!(err.is_feed_error());
    }

    #[test]
    fn test_feed_read_error_display() {
        let err = Error::FeedRead {
            path: PathBuf::from("/srv/feed/drone-status.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/srv/feed/drone-status.json"));
        assert!(err.is_feed_error());
    }

    #[test]
    fn test_feed_decode_error_display() {
        let source = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = Error::FeedDecode {
            path: PathBuf::from("damage-status.json"),
            source,
        };
        assert!(err.to_string().contains("malformed status payload"));
        assert!(err.is_feed_error());
    }

    #[test]
    fn test_non_feed_errors() {
        assert!(!Error::ConfigValidation { message: "x".into() }.is_feed_error());
        assert!(!Error::frame_geometry("x").is_feed_error());
    }

    #[test]
    fn test_bind_error_display() {
        let err = Error::Bind {
            addr: "127.0.0.1:80".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("127.0.0.1:80"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "port must be greater than 0".to_string(),
        };
        assert!(err.to_string().contains("port must be greater than 0"));
    }
}
