//! Error types shared across the crate.
//!
//! The pure computation core never returns errors: missing samples are `None`,
//! empty sample sets resolve to a zero probability. Errors only come from
//! configuration, request validation and the network gateways.

/// Result type for fallible operations.
pub type ClimateResult<T> = Result<T, ClimateError>;

/// Error type for configuration, validation and gateway operations.
#[derive(Debug, thiserror::Error)]
pub enum ClimateError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClimateError {
    /// Whether the error originates from talking to a remote service.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClimateError::Transport(_) | ClimateError::Status { .. } | ClimateError::Decode(_)
        )
    }
}

impl From<String> for ClimateError {
    fn from(s: String) -> Self {
        ClimateError::Internal(s)
    }
}

impl From<&str> for ClimateError {
    fn from(s: &str) -> Self {
        ClimateError::Internal(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        assert!(ClimateError::Transport("timeout".into()).is_transport());
        assert!(ClimateError::Status {
            status: 503,
            body: "busy".into()
        }
        .is_transport());
        assert!(ClimateError::Decode("bad json".into()).is_transport());
        assert!(!ClimateError::Validation("no variables".into()).is_transport());
    }

    #[test]
    fn test_string_conversion() {
        let err: ClimateError = "boom".into();
        assert!(matches!(err, ClimateError::Internal(ref m) if m == "boom"));
        assert_eq!(err.to_string(), "Internal error: boom");
    }
}
