//! Operation handlers translating requests into lifecycle service calls.

use super::request::{ApiRequest, ApiResponse, RequestError, ResponseBody};
use crate::task::{
    domain::{TaskDomainError, TaskId, TaskStatus},
    ports::TaskRepository,
    services::{CreateTaskRequest, TaskLifecycleError, TaskLifecycleService, UpdateTaskRequest},
};
use crate::user::{
    domain::{UserDomainError, UserId},
    ports::UserRepository,
    services::{RegisterUserRequest, UserRegistrationService, UserServiceError},
};
use mockable::Clock;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

const TASK_ID: &str = "taskId";
const USER_ID: &str = "userId";

const TITLE_RULE: &str =
    "Title should have only # and _ as special character, should be >3 and <30 characters.";
const NOT_AUTHORIZED: &str = "User does not have the Authority";
const USER_NOT_FOUND: &str = "User not found";
const MEMBER_NOT_FOUND: &str = "member does not exist";
const EMPTY_UPDATE: &str = "wrong query";
const TASK_NOT_FOUND: &str = "Task not found.";
const TASK_RETRIEVED: &str = "Successfully retrieved Task.";
const INVALID_ROLE: &str = "Invalid user role";

/// Operations exposed by [`TaskboardHandlers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Register a user.
    CreateUser,
    /// Create a draft task.
    CreateTask,
    /// Read one task.
    GetTask,
    /// Change a task's title and/or description.
    UpdateTask,
    /// Remove a task.
    DeleteTask,
    /// List the tasks assigned to a user.
    GetAllTasksForAUser,
    /// Assign a task to a user.
    AssignTaskToAUser,
    /// Move a task to `Inprogress`.
    UpdateTaskToInprogress,
    /// Move a task to `Complete`.
    UpdateTaskToComplete,
    /// Move a task to `Close`.
    UpdateTaskToClose,
}

impl Operation {
    /// Message reported when the operation fails with status 500.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::CreateUser => "Failed to create User.",
            Self::CreateTask => "Failed to create Task.",
            Self::GetTask => "Failed to get Task.",
            Self::DeleteTask => "Failed to delete Task.",
            Self::GetAllTasksForAUser => "Failed to retrieve Tasks.",
            Self::UpdateTask
            | Self::AssignTaskToAUser
            | Self::UpdateTaskToInprogress
            | Self::UpdateTaskToComplete
            | Self::UpdateTaskToClose => "Failed to update Task.",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CreateUser => "createUser",
            Self::CreateTask => "createTask",
            Self::GetTask => "getTask",
            Self::UpdateTask => "updateTask",
            Self::DeleteTask => "deleteTask",
            Self::GetAllTasksForAUser => "getAllTasksForAUser",
            Self::AssignTaskToAUser => "assignTaskToAUser",
            Self::UpdateTaskToInprogress => "updateTaskToInprogress",
            Self::UpdateTaskToComplete => "updateTaskToComplete",
            Self::UpdateTaskToClose => "updateTaskToClose",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
enum HandlerError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error("unparseable user identifier: {0}")]
    UnknownUser(String),
    #[error("unparseable member identifier: {0}")]
    UnknownMember(String),
    #[error("unparseable task identifier: {0}")]
    UnknownTask(String),
    #[error(transparent)]
    Lifecycle(#[from] TaskLifecycleError),
    #[error(transparent)]
    Registration(#[from] UserServiceError),
    #[error("failed to encode response data: {0}")]
    Encode(#[from] serde_json::Error),
}

impl HandlerError {
    /// Message for outcomes answered with status 200, or `None` for
    /// failures.
    fn rejection_message(&self) -> Option<String> {
        match self {
            Self::UnknownUser(_) | Self::Lifecycle(TaskLifecycleError::UserNotFound(_)) => {
                Some(USER_NOT_FOUND.to_owned())
            }
            Self::UnknownMember(_) | Self::Lifecycle(TaskLifecycleError::AssigneeNotFound(_)) => {
                Some(MEMBER_NOT_FOUND.to_owned())
            }
            Self::UnknownTask(_) | Self::Lifecycle(TaskLifecycleError::TaskNotFound(_)) => {
                Some(TASK_NOT_FOUND.to_owned())
            }
            Self::Lifecycle(TaskLifecycleError::NotAuthorized { .. }) => {
                Some(NOT_AUTHORIZED.to_owned())
            }
            Self::Lifecycle(TaskLifecycleError::Domain(domain)) => Some(match domain {
                TaskDomainError::InvalidTitle(_) => TITLE_RULE.to_owned(),
                TaskDomainError::EmptyUpdate => EMPTY_UPDATE.to_owned(),
                TaskDomainError::InvalidStateTransition { from, to, .. } => {
                    format!("Invalid status transition from {from} to {to}")
                }
            }),
            Self::Registration(UserServiceError::Domain(UserDomainError::InvalidRole(_))) => {
                Some(INVALID_ROLE.to_owned())
            }
            Self::Request(_)
            | Self::Lifecycle(
                TaskLifecycleError::Identity(_) | TaskLifecycleError::Repository(_),
            )
            | Self::Registration(UserServiceError::Repository(_))
            | Self::Encode(_) => None,
        }
    }
}

type HandlerResult = Result<ResponseBody, HandlerError>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActingUserBody {
    user_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTaskBody {
    user_id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateTaskBody {
    user_id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateUserBody {
    first_name: String,
    last_name: String,
    email: String,
    user_role: String,
}

fn parse_user(raw: &str) -> Result<UserId, HandlerError> {
    raw.parse()
        .map_err(|_| HandlerError::UnknownUser(raw.to_owned()))
}

fn parse_member(raw: &str) -> Result<UserId, HandlerError> {
    raw.parse()
        .map_err(|_| HandlerError::UnknownMember(raw.to_owned()))
}

fn parse_task(raw: &str) -> Result<TaskId, HandlerError> {
    raw.parse()
        .map_err(|_| HandlerError::UnknownTask(raw.to_owned()))
}

/// Empty strings count as "not supplied".
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

fn respond(operation: Operation, outcome: HandlerResult) -> ApiResponse {
    let err = match outcome {
        Ok(body) => return ApiResponse::ok(&body),
        Err(err) => err,
    };
    if let Some(message) = err.rejection_message() {
        tracing::info!(%operation, reason = %err, "request rejected");
        return ApiResponse::ok(&ResponseBody::message(message));
    }
    tracing::error!(%operation, error = %err, "request failed");
    ApiResponse::server_error(&ResponseBody::failure(operation.failure_message(), &err))
}

/// Request handlers for every Taskboard operation.
pub struct TaskboardHandlers<T, U, C>
where
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    lifecycle: TaskLifecycleService<T, U, C>,
    registration: UserRegistrationService<U, C>,
}

impl<T, U, C> TaskboardHandlers<T, U, C>
where
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates the handlers from the two services they drive.
    #[must_use]
    pub const fn new(
        lifecycle: TaskLifecycleService<T, U, C>,
        registration: UserRegistrationService<U, C>,
    ) -> Self {
        Self {
            lifecycle,
            registration,
        }
    }

    /// Handles one request for `operation`.
    ///
    /// Never fails: every outcome, including store failures, is encoded in
    /// the returned [`ApiResponse`].
    pub async fn handle(&self, operation: Operation, request: &ApiRequest) -> ApiResponse {
        let outcome = match operation {
            Operation::CreateUser => self.create_user(request).await,
            Operation::CreateTask => self.create_task(request).await,
            Operation::GetTask => self.get_task(request).await,
            Operation::UpdateTask => self.update_task(request).await,
            Operation::DeleteTask => self.delete_task(request).await,
            Operation::GetAllTasksForAUser => self.get_all_tasks_for_a_user(request).await,
            Operation::AssignTaskToAUser => self.assign_task_to_a_user(request).await,
            Operation::UpdateTaskToInprogress => {
                self.change_status(request, StatusCommand::Start).await
            }
            Operation::UpdateTaskToComplete => {
                self.change_status(request, StatusCommand::Complete).await
            }
            Operation::UpdateTaskToClose => self.change_status(request, StatusCommand::Close).await,
        };
        respond(operation, outcome)
    }

    async fn create_user(&self, request: &ApiRequest) -> HandlerResult {
        let body: CreateUserBody = request.json_body()?;
        let user = self
            .registration
            .register(RegisterUserRequest::new(
                body.first_name,
                body.last_name,
                body.email,
                body.user_role,
            ))
            .await?;
        Ok(ResponseBody::message("Successfully created User.").with_data(&user)?)
    }

    async fn create_task(&self, request: &ApiRequest) -> HandlerResult {
        let body: CreateTaskBody = request.json_body()?;
        let acting_user = parse_user(&body.user_id)?;
        let mut create = CreateTaskRequest::new(acting_user, body.title);
        if let Some(description) = body.description {
            create = create.with_description(description);
        }
        let task = self.lifecycle.create_task(create).await?;
        Ok(ResponseBody::message("Successfully created Task.").with_data(&task)?)
    }

    async fn get_task(&self, request: &ApiRequest) -> HandlerResult {
        let raw = request.path_parameter(TASK_ID)?;
        let found = match raw.parse::<TaskId>() {
            Ok(task_id) => self.lifecycle.find_task(task_id).await?,
            Err(_) => None,
        };
        let body = ResponseBody::message(TASK_RETRIEVED);
        // A missing task is still a successful read, answered with `data: {}`.
        let Some(task) = found else {
            return Ok(body.with_empty_data());
        };
        Ok(body.with_data(&task)?)
    }

    async fn update_task(&self, request: &ApiRequest) -> HandlerResult {
        let body: UpdateTaskBody = request.json_body()?;
        let acting_user = parse_user(&body.user_id)?;
        let task_id = parse_task(request.path_parameter(TASK_ID)?)?;

        let mut update = UpdateTaskRequest::new(task_id, acting_user);
        if let Some(title) = non_empty(body.title) {
            update = update.with_title(title);
        }
        if let Some(description) = non_empty(body.description) {
            update = update.with_description(description);
        }
        let patch = self.lifecycle.update_task(update).await?;
        Ok(ResponseBody::message("Successfully updated Task.").with_data(&patch)?)
    }

    async fn delete_task(&self, request: &ApiRequest) -> HandlerResult {
        let body: ActingUserBody = request.json_body()?;
        let acting_user = parse_user(&body.user_id)?;
        let task_id = parse_task(request.path_parameter(TASK_ID)?)?;
        self.lifecycle.delete_task(task_id, acting_user).await?;
        Ok(ResponseBody::message("Successfully deleted Task."))
    }

    async fn get_all_tasks_for_a_user(&self, request: &ApiRequest) -> HandlerResult {
        let user_id = parse_user(request.path_parameter(USER_ID)?)?;
        let tasks = self.lifecycle.tasks_assigned_to(user_id).await?;
        Ok(ResponseBody::message("Successfully retrieved Tasks.").with_data(&tasks)?)
    }

    async fn assign_task_to_a_user(&self, request: &ApiRequest) -> HandlerResult {
        let body: ActingUserBody = request.json_body()?;
        let acting_user = parse_user(&body.user_id)?;
        let task_id = parse_task(request.path_parameter(TASK_ID)?)?;
        let assignee = parse_member(request.path_parameter(USER_ID)?)?;
        let patch = self
            .lifecycle
            .assign_task(task_id, acting_user, assignee)
            .await?;
        Ok(status_changed(TaskStatus::Assigned).with_data(&patch)?)
    }

    async fn change_status(&self, request: &ApiRequest, command: StatusCommand) -> HandlerResult {
        let body: ActingUserBody = request.json_body()?;
        let acting_user = parse_user(&body.user_id)?;
        let task_id = parse_task(request.path_parameter(TASK_ID)?)?;
        let patch = match command {
            StatusCommand::Start => self.lifecycle.start_task(task_id, acting_user).await?,
            StatusCommand::Complete => self.lifecycle.complete_task(task_id, acting_user).await?,
            StatusCommand::Close => self.lifecycle.close_task(task_id, acting_user).await?,
        };
        Ok(status_changed(command.target()).with_data(&patch)?)
    }
}

#[derive(Debug, Clone, Copy)]
enum StatusCommand {
    Start,
    Complete,
    Close,
}

impl StatusCommand {
    const fn target(self) -> TaskStatus {
        match self {
            Self::Start => TaskStatus::Inprogress,
            Self::Complete => TaskStatus::Complete,
            Self::Close => TaskStatus::Close,
        }
    }
}

fn status_changed(status: TaskStatus) -> ResponseBody {
    ResponseBody::message(format!("Successfully {status} Task."))
}
