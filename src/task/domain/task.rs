//! Task record and its field-level mutation.

use super::{TaskId, TaskPatch, TaskStatus, TaskTitle};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task record.
///
/// Lifecycle timestamps stay `None` until the matching transition sets
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    task_id: TaskId,
    title: TaskTitle,
    description: Option<String>,
    date_created: DateTime<Utc>,
    date_started: Option<DateTime<Utc>>,
    date_assigned: Option<DateTime<Utc>>,
    date_completed: Option<DateTime<Utc>>,
    date_closed: Option<DateTime<Utc>>,
    status: TaskStatus,
    created_by: UserId,
    assigned_to: Option<UserId>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub task_id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted creation timestamp.
    pub date_created: DateTime<Utc>,
    /// Persisted start timestamp, if any.
    pub date_started: Option<DateTime<Utc>>,
    /// Persisted assignment timestamp, if any.
    pub date_assigned: Option<DateTime<Utc>>,
    /// Persisted completion timestamp, if any.
    pub date_completed: Option<DateTime<Utc>>,
    /// Persisted close timestamp, if any.
    pub date_closed: Option<DateTime<Utc>>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted creator.
    pub created_by: UserId,
    /// Persisted assignee, if any.
    pub assigned_to: Option<UserId>,
}

impl Task {
    /// Creates a new task in [`TaskStatus::Draft`] with only `date_created`
    /// set.
    #[must_use]
    pub fn new_draft(
        title: TaskTitle,
        description: Option<String>,
        created_by: UserId,
        clock: &impl Clock,
    ) -> Self {
        Self {
            task_id: TaskId::new(),
            title,
            description,
            date_created: clock.utc(),
            date_started: None,
            date_assigned: None,
            date_completed: None,
            date_closed: None,
            status: TaskStatus::Draft,
            created_by,
            assigned_to: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            task_id: data.task_id,
            title: data.title,
            description: data.description,
            date_created: data.date_created,
            date_started: data.date_started,
            date_assigned: data.date_assigned,
            date_completed: data.date_completed,
            date_closed: data.date_closed,
            status: data.status,
            created_by: data.created_by,
            assigned_to: data.assigned_to,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn date_created(&self) -> DateTime<Utc> {
        self.date_created
    }

    /// Returns when work started, if it has.
    #[must_use]
    pub const fn date_started(&self) -> Option<DateTime<Utc>> {
        self.date_started
    }

    /// Returns when the task was last assigned, if it has been.
    #[must_use]
    pub const fn date_assigned(&self) -> Option<DateTime<Utc>> {
        self.date_assigned
    }

    /// Returns when the task was completed, if it has been.
    #[must_use]
    pub const fn date_completed(&self) -> Option<DateTime<Utc>> {
        self.date_completed
    }

    /// Returns when the task was closed, if it has been.
    #[must_use]
    pub const fn date_closed(&self) -> Option<DateTime<Utc>> {
        self.date_closed
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creator.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<UserId> {
        self.assigned_to
    }

    /// Sets every field named by `patch`, leaving the rest untouched.
    pub fn apply_patch(&mut self, patch: &TaskPatch) {
        if let Some(title) = patch.title() {
            self.title = title.clone();
        }
        if let Some(description) = patch.description() {
            self.description = Some(description.to_owned());
        }
        if let Some(status) = patch.status() {
            self.status = status;
        }
        if let Some(assignee) = patch.assigned_to() {
            self.assigned_to = Some(assignee);
        }
        set_if_named(&mut self.date_started, patch.date_started());
        set_if_named(&mut self.date_assigned, patch.date_assigned());
        set_if_named(&mut self.date_completed, patch.date_completed());
        set_if_named(&mut self.date_closed, patch.date_closed());
    }
}

fn set_if_named(field: &mut Option<DateTime<Utc>>, value: Option<DateTime<Utc>>) {
    if value.is_some() {
        *field = value;
    }
}
