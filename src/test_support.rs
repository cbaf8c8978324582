//! Shared fixtures for unit tests.

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::user::domain::{NewUser, User, UserRole};

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Returns a clock frozen at 2026-10-16T09:30:00Z.
    pub fn default_instant() -> Self {
        Self(
            Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0)
                .single()
                .unwrap_or_default(),
        )
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Builds a user with the given role.
pub fn user_with_role(role: UserRole, clock: &FixedClock) -> User {
    User::register(
        NewUser {
            first_name: "Grace".to_owned(),
            last_name: "Hopper".to_owned(),
            email: format!("{}@example.com", role.as_str().to_ascii_lowercase()),
            role,
        },
        clock,
    )
}
