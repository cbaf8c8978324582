//! Application services for user lookup and registration.

mod identity;
mod registration;

pub use identity::{IdentityResolver, UserLookup};
pub use registration::{
    RegisterUserRequest, UserRegistrationService, UserServiceError, UserServiceResult,
};
