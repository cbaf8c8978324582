//! Proposed task changes and the validated partial-update mutation built
//! from them.

use super::{TaskDomainError, TaskStatus, TaskTitle};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Unvalidated set of fields a caller wants to change on a task.
///
/// Only fields that were set are written; there is no way to clear a field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    title: Option<String>,
    description: Option<String>,
    status: Option<TaskStatus>,
    assigned_to: Option<UserId>,
    date_started: Option<DateTime<Utc>>,
    date_assigned: Option<DateTime<Utc>>,
    date_completed: Option<DateTime<Utc>>,
    date_closed: Option<DateTime<Utc>>,
}

impl TaskChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a change set moving the task to `status` and stamping the
    /// timestamp that belongs to it.
    #[must_use]
    pub fn status_change(status: TaskStatus, at: DateTime<Utc>) -> Self {
        let mut changes = Self::new().with_status(status);
        match status {
            TaskStatus::Draft => {}
            TaskStatus::Assigned => changes.date_assigned = Some(at),
            TaskStatus::Inprogress => changes.date_started = Some(at),
            TaskStatus::Complete => changes.date_completed = Some(at),
            TaskStatus::Close => changes.date_closed = Some(at),
        }
        changes
    }

    /// Sets a new title. The title is validated by [`Self::validate`].
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a new status without touching any timestamp.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub const fn with_assigned_to(mut self, assignee: UserId) -> Self {
        self.assigned_to = Some(assignee);
        self
    }

    /// Returns the status this change set moves the task to, if any.
    #[must_use]
    pub const fn target_status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns `true` when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.assigned_to.is_none()
            && self.date_started.is_none()
            && self.date_assigned.is_none()
            && self.date_completed.is_none()
            && self.date_closed.is_none()
    }

    /// Validates the change set and builds the mutation.
    ///
    /// A missing title is always acceptable; a present one must satisfy
    /// [`TaskTitle::new`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyUpdate`] when no field is set, or
    /// [`TaskDomainError::InvalidTitle`] when the title is malformed.
    pub fn validate(self) -> Result<TaskPatch, TaskDomainError> {
        if self.is_empty() {
            return Err(TaskDomainError::EmptyUpdate);
        }
        let title = self.title.map(TaskTitle::new).transpose()?;
        Ok(TaskPatch {
            title,
            description: self.description,
            status: self.status,
            assigned_to: self.assigned_to,
            date_started: self.date_started,
            date_assigned: self.date_assigned,
            date_completed: self.date_completed,
            date_closed: self.date_closed,
        })
    }
}

/// Validated partial update over a single task.
///
/// Serializes to the attributes it sets, which is what callers receive as
/// the acknowledgement of an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<TaskTitle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assigned_to: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_started: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_assigned: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_completed: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_closed: Option<DateTime<Utc>>,
}

impl TaskPatch {
    /// Returns the new title, if set.
    #[must_use]
    pub const fn title(&self) -> Option<&TaskTitle> {
        self.title.as_ref()
    }

    /// Returns the new description, if set.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the new status, if set.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the new assignee, if set.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<UserId> {
        self.assigned_to
    }

    /// Returns the new start timestamp, if set.
    #[must_use]
    pub const fn date_started(&self) -> Option<DateTime<Utc>> {
        self.date_started
    }

    /// Returns the new assignment timestamp, if set.
    #[must_use]
    pub const fn date_assigned(&self) -> Option<DateTime<Utc>> {
        self.date_assigned
    }

    /// Returns the new completion timestamp, if set.
    #[must_use]
    pub const fn date_completed(&self) -> Option<DateTime<Utc>> {
        self.date_completed
    }

    /// Returns the new close timestamp, if set.
    #[must_use]
    pub const fn date_closed(&self) -> Option<DateTime<Utc>> {
        self.date_closed
    }

    /// Returns the record field names this patch writes, in storage order.
    #[must_use]
    pub fn field_names(&self) -> Vec<&'static str> {
        [
            ("title", self.title.is_some()),
            ("description", self.description.is_some()),
            ("status", self.status.is_some()),
            ("assignedTo", self.assigned_to.is_some()),
            ("dateStarted", self.date_started.is_some()),
            ("dateAssigned", self.date_assigned.is_some()),
            ("dateCompleted", self.date_completed.is_some()),
            ("dateClosed", self.date_closed.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, is_set)| is_set.then_some(name))
        .collect()
    }
}
