//! Task status state machine.

use super::{ParseTaskStatusError, ParseTransitionPolicyError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Task has been created but not handed to anyone.
    Draft,
    /// Task has been assigned to a user.
    Assigned,
    /// Work on the task has started.
    Inprogress,
    /// Work on the task is finished.
    Complete,
    /// Task has been closed by a lead or manager.
    Close,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Assigned => "Assigned",
            Self::Inprogress => "Inprogress",
            Self::Complete => "Complete",
            Self::Close => "Close",
        }
    }

    /// Returns `true` when a task in this status may move to `target`.
    ///
    /// Each forward step is allowed once, so the timestamp it stamps is never
    /// overwritten. Every status except [`TaskStatus::Close`] may be closed;
    /// a closed task is terminal.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Assigned)
                | (Self::Assigned, Self::Inprogress)
                | (Self::Inprogress, Self::Complete)
                | (
                    Self::Draft | Self::Assigned | Self::Inprogress | Self::Complete,
                    Self::Close
                )
        )
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "draft" => Ok(Self::Draft),
            "assigned" => Ok(Self::Assigned),
            "inprogress" => Ok(Self::Inprogress),
            "complete" => Ok(Self::Complete),
            "close" => Ok(Self::Close),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Whether status changes are checked against
/// [`TaskStatus::can_transition_to`] before they are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Read the task first and reject transitions the state machine forbids.
    #[default]
    Enforced,
    /// Write the new status without reading the current one.
    Unchecked,
}

impl TransitionPolicy {
    /// Returns the configuration spelling of the policy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enforced => "enforced",
            Self::Unchecked => "unchecked",
        }
    }
}

impl fmt::Display for TransitionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransitionPolicy {
    type Err = ParseTransitionPolicyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "enforced" => Ok(Self::Enforced),
            "unchecked" => Ok(Self::Unchecked),
            _ => Err(ParseTransitionPolicyError(value.to_owned())),
        }
    }
}
