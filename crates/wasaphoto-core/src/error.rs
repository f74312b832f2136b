//! Error types for wasaphoto-core

use thiserror::Error;
use wasaphoto_router::InsertError;

/// Result type alias for navigation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong around a navigation.
///
/// The guard itself never fails; these come from table construction,
/// resolution, and the session store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed path pattern in a route declaration
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Two declarations resolve to the same path pattern
    #[error("Duplicate route path: {0}")]
    DuplicatePath(String),

    /// Two declarations share a name
    #[error("Duplicate route name: {0}")]
    DuplicateName(String),

    /// Named lookup for a name the table does not declare
    #[error("Unknown route name: {0}")]
    UnknownRoute(String),

    /// Revision name that does not exist
    #[error("Unknown route table revision: {0}")]
    UnknownRevision(String),

    /// Named lookup missing a parameter the pattern needs
    #[error("Missing parameter {param} for route {route}")]
    MissingParam { route: String, param: String },

    /// No record matches the requested path
    #[error("Route not found: {0}")]
    NotFound(String),

    /// Guards kept redirecting
    #[error("Redirect loop: {}", .0.join(" -> "))]
    RedirectLoop(Vec<String>),

    /// The session store refused a read or write
    #[error("Storage error: {0}")]
    Storage(String),

    /// Login with an empty identifier
    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),
}

impl From<InsertError> for Error {
    fn from(err: InsertError) -> Self {
        match err {
            InsertError::Duplicate(pattern) => Error::DuplicatePath(pattern),
            other => Error::InvalidPath(other.to_string()),
        }
    }
}
