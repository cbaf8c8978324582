//! Service layer for user registration.

use crate::user::{
    domain::{NewUser, User, UserDomainError, UserRole},
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    first_name: String,
    last_name: String,
    email: String,
    role: String,
}

impl RegisterUserRequest {
    /// Creates a registration request. The role is parsed case-insensitively
    /// when the request is processed.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            role: role.into(),
        }
    }
}

/// Service-level errors for user registration.
#[derive(Debug, Error)]
pub enum UserServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

/// Result type for user service operations.
pub type UserServiceResult<T> = Result<T, UserServiceError>;

/// User registration service. Registration is open: no acting user is
/// required.
#[derive(Clone)]
pub struct UserRegistrationService<U, C>
where
    U: UserRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<U>,
    clock: Arc<C>,
}

impl<U, C> UserRegistrationService<U, C>
where
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new registration service.
    #[must_use]
    pub const fn new(repository: Arc<U>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Domain`] when the role is unknown, or
    /// [`UserServiceError::Repository`] when persistence fails.
    pub async fn register(&self, request: RegisterUserRequest) -> UserServiceResult<User> {
        let RegisterUserRequest {
            first_name,
            last_name,
            email,
            role,
        } = request;
        let parsed_role = UserRole::try_from(role.as_str()).map_err(UserDomainError::from)?;

        let user = User::register(
            NewUser {
                first_name,
                last_name,
                email,
                role: parsed_role,
            },
            &*self.clock,
        );
        self.repository.store(&user).await?;
        tracing::info!(user_id = %user.id(), role = %user.role(), "registered user");
        Ok(user)
    }
}
