//! Unit tests for the request handlers and HTTP router.


use std::sync::Arc;

use serde_json::{Value, json};

use super::{ApiRequest, ApiResponse, Operation, ResponseBody, TaskboardHandlers};
use crate::task::{adapters::memory::InMemoryTaskRepository, services::TaskLifecycleService};
use crate::test_support::{FixedClock, user_with_role};
use crate::user::{
    adapters::memory::InMemoryUserRepository,
    domain::{UserId, UserRole},
    ports::UserRepository,
    services::UserRegistrationService,
};

pub(super) type MemoryHandlers =
    TaskboardHandlers<InMemoryTaskRepository, InMemoryUserRepository, FixedClock>;

/// Handlers wired to in-memory repositories and a frozen clock.
pub(super) struct Harness {
    pub handlers: Arc<MemoryHandlers>,
    users: Arc<InMemoryUserRepository>,
    clock: Arc<FixedClock>,
}

impl Harness {
    pub fn new() -> Self {
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let clock = Arc::new(FixedClock::default_instant());
        let handlers = TaskboardHandlers::new(
            TaskLifecycleService::new(tasks, Arc::clone(&users), Arc::clone(&clock)),
            UserRegistrationService::new(Arc::clone(&users), Arc::clone(&clock)),
        );
        Self {
            handlers: Arc::new(handlers),
            users,
            clock,
        }
    }

    /// Stores a user with `role` and returns its identifier.
    pub async fn user(&self, role: UserRole) -> UserId {
        let user = user_with_role(role, &self.clock);
        self.users.store(&user).await.expect("store user");
        user.id()
    }

    pub async fn call(&self, operation: Operation, request: &ApiRequest) -> (u16, ResponseBody) {
        decode(&self.handlers.handle(operation, request).await)
    }

    /// Creates a draft task as `manager` and returns its identifier.
    pub async fn draft_task(&self, manager: UserId, title: &str) -> String {
        let (_, body) = self
            .call(Operation::CreateTask, &acting(manager, json!({ "title": title })))
            .await;
        assert_eq!(body.message, "Successfully created Task.");
        data_str(&body, "/taskId").expect("created task id").to_owned()
    }
}

pub(super) fn decode(response: &ApiResponse) -> (u16, ResponseBody) {
    let body = response.decode_body().expect("response body decodes");
    (response.status_code, body)
}

/// Builds a request whose body names `user` as the acting user and merges
/// in `extra` fields.
pub(super) fn acting(user: UserId, extra: Value) -> ApiRequest {
    let mut body = json!({ "userId": user.to_string() });
    if let (Some(target), Value::Object(fields)) = (body.as_object_mut(), extra) {
        target.extend(fields);
    }
    ApiRequest::new().with_json_body(&body)
}

pub(super) fn data_field<'a>(body: &'a ResponseBody, pointer: &str) -> Option<&'a Value> {
    body.data.as_ref().and_then(|data| data.pointer(pointer))
}

pub(super) fn data_str<'a>(body: &'a ResponseBody, pointer: &str) -> Option<&'a str> {
    data_field(body, pointer).and_then(Value::as_str)
}
