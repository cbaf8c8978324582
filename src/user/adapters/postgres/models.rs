//! Diesel row models for user persistence.

use super::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    pub user_id: uuid::Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email address.
    pub email: String,
    /// Role name.
    pub user_role: String,
    /// Registration timestamp.
    pub date_created: DateTime<Utc>,
}

/// Insert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// User identifier.
    pub user_id: uuid::Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email address.
    pub email: String,
    /// Role name.
    pub user_role: String,
    /// Registration timestamp.
    pub date_created: DateTime<Utc>,
}
