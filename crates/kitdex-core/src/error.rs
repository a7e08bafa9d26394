//! Error types and handling for kitdex-core operations.
//!
//! Expected absence is not an error in this crate: a probe that finds nothing
//! yields [`Probe::Missing`](crate::fetcher::Probe::Missing) and resolution
//! yields `None`. The [`Error`] type is reserved for failures a caller has to
//! look at, such as malformed configuration, a client that cannot be built,
//! or a query rejected for missing input.
//!
//! ## Error Categories
//!
//! - **Network Errors**: HTTP transport failures and unexpected status codes
//! - **Timeouts**: a request outlived the configured fetch timeout
//! - **Configuration Errors**: unreadable or malformed settings
//! - **Validation Errors**: missing or empty input to a query operation
//! - **Build Errors**: a single component failed to assemble
//!
//! ```rust
//! use kitdex_core::Error;
//!
//! let err = Error::Timeout("raw fetch exceeded 30s".to_string());
//! assert!(err.is_recoverable());
//! assert_eq!(err.category(), "timeout");
//! ```

use thiserror::Error;

/// The main error type for kitdex-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport failed before a status code was received.
    ///
    /// ## Recoverability
    ///
    /// Connection and timeout failures are recoverable; malformed requests are not.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The upstream host answered with a status other than 200 or 404.
    #[error("HTTP {status} from {url}")]
    Http {
        /// Status code returned by the server.
        status: u16,
        /// URL that was requested.
        url: String,
    },

    /// An operation exceeded its time budget.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Converting between data formats failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Input to a query operation was missing or empty.
    ///
    /// These are surfaced to the caller verbatim and are not system faults.
    #[error("{0}")]
    Validation(String),

    /// A single component could not be assembled.
    #[error("Failed to build component '{component}': {reason}")]
    Build {
        /// Identifier of the component that failed.
        component: String,
        /// Human-readable failure reason.
        reason: String,
    },
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Check if the error might be recoverable through retry logic.
    ///
    /// Returns `true` for transport timeouts, connection failures, explicit
    /// timeouts, and 5xx/429 responses. Everything else is permanent.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout(_) => true,
            Self::Http { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Get the error category as a static string identifier.
    ///
    /// Useful for log fields and grouping failures.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Network(_) | Self::Http { .. } => "network",
            Self::Timeout(_) => "timeout",
            Self::Config(_) => "config",
            Self::Serialization(_) => "serialization",
            Self::Validation(_) => "validation",
            Self::Build { .. } => "build",
        }
    }
}

/// Convenience type alias for [`std::result::Result`] with kitdex-core's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_formatting() {
        let err = Error::Http {
            status: 502,
            url: "https://example.com/a.tsx".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 502 from https://example.com/a.tsx");

        let err = Error::Build {
            component: "wallet".to_string(),
            reason: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to build component 'wallet': boom");

        let err = Error::Validation("component_name is required".to_string());
        assert_eq!(err.to_string(), "component_name is required");
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(Error::Timeout(String::new()).category(), "timeout");
        assert_eq!(Error::Config(String::new()).category(), "config");
        assert_eq!(Error::Validation(String::new()).category(), "validation");
        assert_eq!(
            Error::Http {
                status: 500,
                url: String::new()
            }
            .category(),
            "network"
        );
        assert_eq!(
            Error::Build {
                component: String::new(),
                reason: String::new()
            }
            .category(),
            "build"
        );
    }

    #[test]
    fn test_error_recoverability() {
        assert!(Error::Timeout("slow".into()).is_recoverable());
        assert!(
            Error::Http {
                status: 503,
                url: String::new()
            }
            .is_recoverable()
        );
        assert!(
            Error::Http {
                status: 429,
                url: String::new()
            }
            .is_recoverable()
        );
        assert!(
            !Error::Http {
                status: 403,
                url: String::new()
            }
            .is_recoverable()
        );
        assert!(!Error::Config("bad".into()).is_recoverable());
        assert!(!Error::Validation("empty".into()).is_recoverable());
    }

    #[test]
    fn test_from_serde_json_error() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = parse.into();
        assert_eq!(err.category(), "serialization");
    }
}
