//! Diesel schema for task lifecycle persistence.

diesel::table! {
    /// Task records keyed by identifier.
    tasks (task_id) {
        /// Task identifier.
        task_id -> Uuid,
        /// Validated title.
        #[max_length = 29]
        title -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Task lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Creating user.
        created_by -> Uuid,
        /// Assigned user, if any.
        assigned_to -> Nullable<Uuid>,
        /// Creation timestamp.
        date_created -> Timestamptz,
        /// Start timestamp.
        date_started -> Nullable<Timestamptz>,
        /// Assignment timestamp.
        date_assigned -> Nullable<Timestamptz>,
        /// Completion timestamp.
        date_completed -> Nullable<Timestamptz>,
        /// Close timestamp.
        date_closed -> Nullable<Timestamptz>,
    }
}
