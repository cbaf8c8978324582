//! Identity resolution for acting and target users.
//!
//! Lookups distinguish a missing user from a failing store so callers can
//! answer "User not found" for the first and surface an infrastructure error
//! for the second.

use crate::user::{
    domain::{User, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use std::sync::Arc;

/// Outcome of resolving a user identifier.
#[derive(Debug, Clone)]
pub enum UserLookup {
    /// The user exists.
    Found(User),
    /// No user is stored under the identifier.
    NotFound,
    /// The store failed while looking the user up.
    BackendFailure(UserRepositoryError),
}

impl UserLookup {
    /// Converts the lookup into a `Result`, keeping absence as `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns the repository error carried by
    /// [`UserLookup::BackendFailure`].
    pub fn into_result(self) -> Result<Option<User>, UserRepositoryError> {
        match self {
            Self::Found(user) => Ok(Some(user)),
            Self::NotFound => Ok(None),
            Self::BackendFailure(err) => Err(err),
        }
    }
}

/// Resolves user identifiers against the user repository.
#[derive(Clone)]
pub struct IdentityResolver<U>
where
    U: UserRepository,
{
    repository: Arc<U>,
}

impl<U> IdentityResolver<U>
where
    U: UserRepository,
{
    /// Creates a resolver backed by the given repository.
    #[must_use]
    pub const fn new(repository: Arc<U>) -> Self {
        Self { repository }
    }

    /// Looks up a user by identifier.
    pub async fn resolve(&self, user_id: UserId) -> UserLookup {
        match self.repository.find_by_id(user_id).await {
            Ok(Some(user)) => UserLookup::Found(user),
            Ok(None) => {
                tracing::debug!(user_id = %user_id, "user not found");
                UserLookup::NotFound
            }
            Err(err) => {
                tracing::error!(user_id = %user_id, error = %err, "user lookup failed");
                UserLookup::BackendFailure(err)
            }
        }
    }
}
