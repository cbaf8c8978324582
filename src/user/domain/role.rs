//! User roles and the authority they carry over tasks.

use super::ParseUserRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role assigned to a user at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    /// Team lead; may create, assign, close, and delete tasks.
    Lead,
    /// Manager; same task authority as a lead.
    Manager,
    /// Team member; may only progress tasks.
    Member,
}

impl UserRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lead => "Lead",
            Self::Manager => "Manager",
            Self::Member => "Member",
        }
    }

    /// Returns `true` when the role may create, assign, close, or delete
    /// tasks.
    #[must_use]
    pub const fn can_manage_tasks(self) -> bool {
        matches!(self, Self::Lead | Self::Manager)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UserRole {
    type Error = ParseUserRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "lead" => Ok(Self::Lead),
            "manager" => Ok(Self::Manager),
            "member" => Ok(Self::Member),
            _ => Err(ParseUserRoleError(value.to_owned())),
        }
    }
}
