//! Error types for resource construction and parsing.
//!
//! Only two things can go wrong in the resource model:
//!
//! - **[`ResourceError::InvalidArgument`]**: an explicit resource name contains a slash
//! - **[`ResourceError::Parse`]**: serialized resource text or records could not be read
//!
//! Everything else (odd paths, missing arguments, unusual data shapes) is
//! normalized instead of rejected.
//!
//! # Error Bodies
//!
//! The serving layer reports failures to HTTP clients as a JSON body. Use
//! [`ResourceError::to_error_response`] to build one:
//!
//! ```rust
//! use resource_router::{Resource, ResourceError};
//!
//! let error = Resource::from_collection_and_name("/users", "/jdoe/orders", ()).unwrap_err();
//! let response = error.to_error_response(Some("/users/jdoe/orders"));
//!
//! assert_eq!(response.status, 400);
//! assert_eq!(response.errors.code, "invalid_argument");
//! ```

use serde::Serialize;
use thiserror::Error;

/// Error type for resource operations.
///
/// # Example
///
/// ```rust
/// use resource_router::{Resource, ResourceError};
///
/// let result = Resource::from_collection_and_name("/users", "/jdoe/orders", ());
/// assert!(matches!(result, Err(ResourceError::InvalidArgument { .. })));
///
/// let result = Resource::parse("{ not json");
/// assert!(matches!(result, Err(ResourceError::Parse(_))));
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// An explicit resource name contained a path separator.
    ///
    /// Names passed separately from their collection must be a single
    /// segment. Leading and trailing slashes are tolerated, inner ones are not.
    #[error("Resource names cannot contain slashes (got '{name}')")]
    InvalidArgument {
        /// The rejected name, as given.
        name: String,
    },

    /// Serialized resource input could not be parsed.
    #[error("Unable to parse resource data: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ResourceError {
    /// Returns the HTTP status the serving layer should answer with.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::InvalidArgument { .. } | Self::Parse(_) => 400,
        }
    }

    /// Returns a stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::Parse(_) => "parse_error",
        }
    }

    /// Builds the JSON error body for this error.
    ///
    /// `path` is the request path that triggered the failure, if known.
    #[must_use]
    pub fn to_error_response(&self, path: Option<&str>) -> ErrorResponse {
        let detail = match self {
            Self::InvalidArgument { name } => format!("invalid resource name '{name}'"),
            Self::Parse(err) => format!("line {}, column {}: {err}", err.line(), err.column()),
        };

        ErrorResponse {
            status: self.status(),
            message: self.to_string(),
            errors: ErrorDetails {
                code: self.code(),
                errors: vec![detail],
                path: path.map(ToString::to_string),
            },
        }
    }
}

/// A serializable error body.
///
/// Serializes as `{"message": ..., "errors": {"code": ..., "errors": [...], "path": ...}}`.
/// The status is carried alongside for the transport but is not part of the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    /// HTTP status code.
    #[serde(skip)]
    pub status: u16,
    /// Human-readable summary.
    pub message: String,
    /// Structured details.
    pub errors: ErrorDetails,
}

/// Structured details inside an [`ErrorResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetails {
    /// Machine-readable error code.
    pub code: &'static str,
    /// Individual error messages.
    pub errors: Vec<String>,
    /// The request path that failed, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
    assert_send_sync::<ErrorResponse>();
};
