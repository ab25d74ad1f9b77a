//! Error handling for the Inverstra service core

/// Result type alias for the service core
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the service core
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Missing or malformed configuration (fails fast at construction)
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The wallet client could not be initialized or timed out
    #[error("Dependency unavailable: {message}")]
    DependencyUnavailable { message: String },

    /// The requested transaction builder has not been implemented yet
    #[error("Not implemented: {operation}")]
    NotImplemented { operation: String },

    /// Validation errors on operation or query inputs
    #[error("Validation failed: {field}")]
    Validation { field: String },

    /// Upstream provider call failed (transport or non-success response)
    #[error("Provider error: {message}")]
    Provider { message: String },

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl Error {
    /// Create a new configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a new dependency-unavailable error
    pub fn dependency_unavailable(message: impl Into<String>) -> Self {
        Self::DependencyUnavailable {
            message: message.into(),
        }
    }

    /// Create a new not-implemented error
    pub fn not_implemented(operation: impl Into<String>) -> Self {
        Self::NotImplemented {
            operation: operation.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
        }
    }

    /// Create a new provider error
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Convenience macros for creating specific error types
#[macro_export]
macro_rules! provider_error {
    ($msg:expr) => {
        $crate::Error::provider($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::provider(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! dependency_error {
    ($msg:expr) => {
        $crate::Error::dependency_unavailable($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::dependency_unavailable(format!($fmt, $($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = Error::configuration("missing project id");
        assert!(matches!(config_err, Error::Configuration { .. }));

        let dep_err = Error::dependency_unavailable("wallet init timed out");
        assert!(matches!(dep_err, Error::DependencyUnavailable { .. }));

        let validation_err = Error::validation("wallet_address");
        assert!(matches!(validation_err, Error::Validation { .. }));
    }

    #[test]
    fn test_error_macros() {
        let provider_err = provider_error!("status {}", 503);
        assert!(matches!(provider_err, Error::Provider { .. }));

        let dep_err = dependency_error!("unreachable");
        assert!(matches!(dep_err, Error::DependencyUnavailable { .. }));
    }

    #[test]
    fn test_error_messages_are_nonempty() {
        let err = Error::dependency_unavailable("wallet client initialisation failed");
        assert!(!err.to_string().is_empty());
    }
}
