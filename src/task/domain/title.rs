//! Validated task title.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Titles must be longer than this many characters.
const MIN_EXCLUSIVE_LENGTH: usize = 3;

/// Titles must be shorter than this many characters.
const MAX_EXCLUSIVE_LENGTH: usize = 30;

/// Task title restricted to `[A-Za-z0-9#_]` with a length strictly between
/// 3 and 30 characters.
///
/// Deserialization goes through [`TaskTitle::new`], so a stored or received
/// title is checked like any other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated title. The value is not trimmed; surrounding
    /// whitespace is rejected like any other disallowed character.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTitle`] when the value contains a
    /// disallowed character or its length is outside the exclusive bounds.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let has_allowed_chars = !raw.is_empty()
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '#' || c == '_');
        let length = raw.chars().count();
        let has_allowed_length = length > MIN_EXCLUSIVE_LENGTH && length < MAX_EXCLUSIVE_LENGTH;

        if !has_allowed_chars || !has_allowed_length {
            return Err(TaskDomainError::InvalidTitle(raw));
        }
        Ok(Self(raw))
    }

    /// Returns the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskTitle {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskTitle> for String {
    fn from(title: TaskTitle) -> Self {
        title.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
