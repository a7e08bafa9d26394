//! Error types for the kitdex MCP server with MCP error code mapping

use thiserror::Error;

/// Errors that can occur in the MCP server
#[derive(Debug, Error)]
pub enum McpError {
    /// Core operation failed
    #[error("{0}")]
    Core(#[from] kitdex_core::Error),

    /// JSON serialization/deserialization error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Protocol error
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),

    /// Invalid parameter provided
    #[error("{0}")]
    InvalidParams(String),

    /// No component matched the requested name
    #[error("Component '{name}' not found. {hint}")]
    ComponentNotFound {
        /// Name as the caller gave it
        name: String,
        /// Suggestions or the list of available components
        hint: String,
    },

    /// No component belongs to the requested category
    #[error("No components found in category '{category}'. Available categories: {available}")]
    CategoryNotFound {
        /// Category as the caller gave it
        category: String,
        /// Comma-separated list of known categories
        available: String,
    },

    /// Package manager without an installation guide
    #[error("Unsupported package manager '{0}'. Supported: {1}")]
    UnsupportedPackageManager(String, String),

    /// Tool name not registered with the server
    #[error("unknown tool: {0}")]
    UnknownTool(String),
}

impl McpError {
    /// Map error to MCP error code
    pub const fn error_code(&self) -> i32 {
        match self {
            Self::Core(_) | Self::Internal(_) => {
                -32603 // Internal error
            },
            Self::Json(_) => -32700,     // Parse error
            Self::Protocol(_) => -32600, // Invalid request
            Self::InvalidParams(_)
            | Self::ComponentNotFound { .. }
            | Self::CategoryNotFound { .. }
            | Self::UnsupportedPackageManager(..)
            | Self::UnknownTool(_) => {
                -32602 // Invalid params
            },
        }
    }

    /// Whether the message is meant for the caller rather than a fault report.
    ///
    /// User-facing errors are returned as tool results verbatim and are not
    /// logged as failures.
    pub const fn is_user_facing(&self) -> bool {
        match self {
            Self::InvalidParams(_)
            | Self::ComponentNotFound { .. }
            | Self::CategoryNotFound { .. }
            | Self::UnsupportedPackageManager(..) => true,
            Self::Core(e) => matches!(e, kitdex_core::Error::Validation(_)),
            Self::Json(_) | Self::Protocol(_) | Self::Internal(_) | Self::UnknownTool(_) => false,
        }
    }
}

impl From<anyhow::Error> for McpError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Result type alias for MCP operations
pub type McpResult<T> = Result<T, McpError>;
