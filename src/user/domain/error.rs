//! Error types for user domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing user domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The requested role is not one of Lead, Manager, or Member.
    #[error("invalid user role '{0}', expected Lead, Manager, or Member")]
    InvalidRole(String),
}

/// Error returned while parsing user roles from requests or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown user role: {0}")]
pub struct ParseUserRoleError(pub String);

impl From<ParseUserRoleError> for UserDomainError {
    fn from(err: ParseUserRoleError) -> Self {
        Self::InvalidRole(err.0)
    }
}
