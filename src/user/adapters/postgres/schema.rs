//! Diesel schema for user persistence.

diesel::table! {
    /// Registered users keyed by identifier.
    users (user_id) {
        /// User identifier.
        user_id -> Uuid,
        /// Given name.
        first_name -> Varchar,
        /// Family name.
        last_name -> Varchar,
        /// Contact email address.
        email -> Varchar,
        /// Role name (`Lead`, `Manager`, `Member`).
        #[max_length = 20]
        user_role -> Varchar,
        /// Registration timestamp.
        date_created -> Timestamptz,
    }
}
