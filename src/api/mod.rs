//! Request handling for Taskboard.
//!
//! Handlers consume a generic [`ApiRequest`] (path parameters plus a JSON
//! body) and answer with an [`ApiResponse`] (status code plus a JSON body).
//! Rejections such as a missing user, an insufficient role, or a malformed
//! title are answered with status 200 and an explanatory message; only
//! store failures and unreadable requests produce status 500. The
//! [`http`] module mounts the handlers on an axum router.

mod handlers;
pub mod http;
mod request;

pub use handlers::{Operation, TaskboardHandlers};
pub use request::{ApiRequest, ApiResponse, RequestError, ResponseBody};

#[cfg(test)]
mod tests;
