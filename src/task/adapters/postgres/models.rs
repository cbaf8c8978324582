//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub task_id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Creating user.
    pub created_by: uuid::Uuid,
    /// Assigned user.
    pub assigned_to: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub date_created: DateTime<Utc>,
    /// Start timestamp.
    pub date_started: Option<DateTime<Utc>>,
    /// Assignment timestamp.
    pub date_assigned: Option<DateTime<Utc>>,
    /// Completion timestamp.
    pub date_completed: Option<DateTime<Utc>>,
    /// Close timestamp.
    pub date_closed: Option<DateTime<Utc>>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub task_id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Creating user.
    pub created_by: uuid::Uuid,
    /// Assigned user.
    pub assigned_to: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub date_created: DateTime<Utc>,
    /// Start timestamp.
    pub date_started: Option<DateTime<Utc>>,
    /// Assignment timestamp.
    pub date_assigned: Option<DateTime<Utc>>,
    /// Completion timestamp.
    pub date_completed: Option<DateTime<Utc>>,
    /// Close timestamp.
    pub date_closed: Option<DateTime<Utc>>,
}

/// Partial update for task records. `None` fields are left out of the
/// generated `SET` clause.
#[derive(Debug, Clone, Default, PartialEq, Eq, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New lifecycle status.
    pub status: Option<String>,
    /// New assignee.
    pub assigned_to: Option<uuid::Uuid>,
    /// New start timestamp.
    pub date_started: Option<DateTime<Utc>>,
    /// New assignment timestamp.
    pub date_assigned: Option<DateTime<Utc>>,
    /// New completion timestamp.
    pub date_completed: Option<DateTime<Utc>>,
    /// New close timestamp.
    pub date_closed: Option<DateTime<Utc>>,
}
