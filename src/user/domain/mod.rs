//! Domain model for users and their roles.

mod error;
mod ids;
mod role;
mod user;

pub use error::{ParseUserRoleError, UserDomainError};
pub use ids::UserId;
pub use role::UserRole;
pub use user::{NewUser, PersistedUserData, User};
