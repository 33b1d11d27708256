//! Error types

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration validation error, surfaced at construction time
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    /// Sink delivery error
    #[error("sink delivery error for stream '{stream_name}': {message}")]
    SinkDelivery {
        stream_name: String,
        message: String,
    },

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a sink delivery error
    pub fn sink_delivery(stream_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkDelivery {
            stream_name: stream_name.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_validation_display() {
        let e = Error::config_validation("buffer_size", "must be at least 1");
        assert_eq!(
            e.to_string(),
            "config validation error at 'buffer_size': must be at least 1"
        );
    }

    #[test]
    fn sink_delivery_display() {
        let e = Error::sink_delivery("Metrics", "throttled");
        assert_eq!(
            e.to_string(),
            "sink delivery error for stream 'Metrics': throttled"
        );
    }
}
