//! User record.

use super::{UserId, UserRole};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    user_id: UserId,
    first_name: String,
    last_name: String,
    email: String,
    date_created: DateTime<Utc>,
    user_role: UserRole,
}

/// Profile fields supplied when registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email address.
    pub email: String,
    /// Role controlling task authority.
    pub role: UserRole,
}

/// Parameter object for reconstructing a persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub user_id: UserId,
    /// Persisted given name.
    pub first_name: String,
    /// Persisted family name.
    pub last_name: String,
    /// Persisted email address.
    pub email: String,
    /// Persisted creation timestamp.
    pub date_created: DateTime<Utc>,
    /// Persisted role.
    pub user_role: UserRole,
}

impl User {
    /// Creates a new user with a fresh identifier.
    #[must_use]
    pub fn register(profile: NewUser, clock: &impl Clock) -> Self {
        Self {
            user_id: UserId::new(),
            first_name: profile.first_name,
            last_name: profile.last_name,
            email: profile.email,
            date_created: clock.utc(),
            user_role: profile.role,
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            user_id: data.user_id,
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            date_created: data.date_created,
            user_role: data.user_role,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.user_id
    }

    /// Returns the given name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the family name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn date_created(&self) -> DateTime<Utc> {
        self.date_created
    }

    /// Returns the user's role.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.user_role
    }
}
