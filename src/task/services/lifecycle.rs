//! Service layer for task creation, lookup, and lifecycle transitions.
//!
//! Every operation follows the same shape: resolve the acting user, check the
//! role the operation demands, then hand a [`TaskChanges`] to the partial
//! update core. The permission matrix is:
//!
//! | Operation | Acting user |
//! |---|---|
//! | create, assign, close, delete | Lead or Manager |
//! | update details, start, complete | any existing user |
//! | lookups | none |

use super::{TaskLifecycleError, TaskLifecycleResult, mutation};
use crate::task::{
    domain::{
        Task, TaskChanges, TaskDomainError, TaskId, TaskPatch, TaskStatus, TaskTitle,
        TransitionPolicy,
    },
    ports::TaskRepository,
};
use crate::user::{
    domain::{User, UserId},
    ports::UserRepository,
    services::{IdentityResolver, UserLookup},
};
use mockable::Clock;
use std::sync::Arc;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    acting_user: UserId,
    title: String,
    description: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(acting_user: UserId, title: impl Into<String>) -> Self {
        Self {
            acting_user,
            title: title.into(),
            description: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request payload for changing a task's title and/or description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    task_id: TaskId,
    acting_user: UserId,
    title: Option<String>,
    description: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates a request that changes nothing yet.
    #[must_use]
    pub const fn new(task_id: TaskId, acting_user: UserId) -> Self {
        Self {
            task_id,
            acting_user,
            title: None,
            description: None,
        }
    }

    /// Sets the new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<T, U, C>
where
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    identity: IdentityResolver<U>,
    clock: Arc<C>,
    policy: TransitionPolicy,
}

impl<T, U, C> TaskLifecycleService<T, U, C>
where
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service that enforces the status transition table.
    #[must_use]
    pub const fn new(tasks: Arc<T>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            identity: IdentityResolver::new(users),
            clock,
            policy: TransitionPolicy::Enforced,
        }
    }

    /// Replaces the transition policy.
    #[must_use]
    pub const fn with_transition_policy(mut self, policy: TransitionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the active transition policy.
    #[must_use]
    pub const fn transition_policy(&self) -> TransitionPolicy {
        self.policy
    }

    /// Creates a task in [`TaskStatus::Draft`] on behalf of a lead or
    /// manager.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::UserNotFound`] or
    /// [`TaskLifecycleError::NotAuthorized`] when the acting user may not
    /// create tasks, [`TaskLifecycleError::Domain`] when the title is
    /// malformed, or a store error.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let CreateTaskRequest {
            acting_user,
            title,
            description,
        } = request;
        let creator = self.authorize_manager(acting_user).await?;
        let validated_title = TaskTitle::new(title)?;

        let task = Task::new_draft(validated_title, description, creator.id(), &*self.clock);
        self.tasks.store(&task).await?;
        tracing::info!(task_id = %task.id(), created_by = %creator.id(), "created task");
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn find_task(&self, task_id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.tasks.find_by_id(task_id).await?)
    }

    /// Lists the tasks assigned to an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::UserNotFound`] when the user does not
    /// exist, or a store error.
    pub async fn tasks_assigned_to(&self, user_id: UserId) -> TaskLifecycleResult<Vec<Task>> {
        let user = self.resolve_actor(user_id).await?;
        Ok(self.tasks.find_by_assignee(user.id()).await?)
    }

    /// Changes a task's title and/or description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::UserNotFound`] when the acting user does
    /// not exist, [`TaskLifecycleError::Domain`] when neither field is given
    /// or the title is malformed, [`TaskLifecycleError::TaskNotFound`], or a
    /// store error.
    pub async fn update_task(&self, request: UpdateTaskRequest) -> TaskLifecycleResult<TaskPatch> {
        let UpdateTaskRequest {
            task_id,
            acting_user,
            title,
            description,
        } = request;
        self.resolve_actor(acting_user).await?;

        let mut changes = TaskChanges::new();
        if let Some(new_title) = title {
            changes = changes.with_title(new_title);
        }
        if let Some(new_description) = description {
            changes = changes.with_description(new_description);
        }
        self.apply_partial_update(task_id, changes).await
    }

    /// Removes a task on behalf of a lead or manager.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::UserNotFound`] or
    /// [`TaskLifecycleError::NotAuthorized`] when the acting user may not
    /// delete tasks, [`TaskLifecycleError::TaskNotFound`], or a store error.
    pub async fn delete_task(&self, task_id: TaskId, acting_user: UserId) -> TaskLifecycleResult<()> {
        self.authorize_manager(acting_user).await?;
        self.tasks.delete(task_id).await?;
        tracing::info!(task_id = %task_id, deleted_by = %acting_user, "deleted task");
        Ok(())
    }

    /// Assigns a task to an existing user and moves it to
    /// [`TaskStatus::Assigned`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::UserNotFound`] or
    /// [`TaskLifecycleError::NotAuthorized`] for the acting user,
    /// [`TaskLifecycleError::AssigneeNotFound`] when the target user does not
    /// exist, [`TaskLifecycleError::Domain`] for a forbidden transition,
    /// [`TaskLifecycleError::TaskNotFound`], or a store error.
    pub async fn assign_task(
        &self,
        task_id: TaskId,
        acting_user: UserId,
        assignee: UserId,
    ) -> TaskLifecycleResult<TaskPatch> {
        self.authorize_manager(acting_user).await?;
        match self.identity.resolve(assignee).await {
            UserLookup::Found(_) => {}
            UserLookup::NotFound => return Err(TaskLifecycleError::AssigneeNotFound(assignee)),
            UserLookup::BackendFailure(err) => return Err(TaskLifecycleError::Identity(err)),
        }

        let changes = TaskChanges::status_change(TaskStatus::Assigned, self.clock.utc())
            .with_assigned_to(assignee);
        self.transition(task_id, changes).await
    }

    /// Moves a task to [`TaskStatus::Inprogress`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::UserNotFound`] when the acting user does
    /// not exist, [`TaskLifecycleError::Domain`] for a forbidden transition,
    /// [`TaskLifecycleError::TaskNotFound`], or a store error.
    pub async fn start_task(
        &self,
        task_id: TaskId,
        acting_user: UserId,
    ) -> TaskLifecycleResult<TaskPatch> {
        self.resolve_actor(acting_user).await?;
        let changes = TaskChanges::status_change(TaskStatus::Inprogress, self.clock.utc());
        self.transition(task_id, changes).await
    }

    /// Moves a task to [`TaskStatus::Complete`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::UserNotFound`] when the acting user does
    /// not exist, [`TaskLifecycleError::Domain`] for a forbidden transition,
    /// [`TaskLifecycleError::TaskNotFound`], or a store error.
    pub async fn complete_task(
        &self,
        task_id: TaskId,
        acting_user: UserId,
    ) -> TaskLifecycleResult<TaskPatch> {
        self.resolve_actor(acting_user).await?;
        let changes = TaskChanges::status_change(TaskStatus::Complete, self.clock.utc());
        self.transition(task_id, changes).await
    }

    /// Moves a task to [`TaskStatus::Close`] on behalf of a lead or manager.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::UserNotFound`] or
    /// [`TaskLifecycleError::NotAuthorized`] for the acting user,
    /// [`TaskLifecycleError::Domain`] when the task is already closed,
    /// [`TaskLifecycleError::TaskNotFound`], or a store error.
    pub async fn close_task(
        &self,
        task_id: TaskId,
        acting_user: UserId,
    ) -> TaskLifecycleResult<TaskPatch> {
        self.authorize_manager(acting_user).await?;
        let changes = TaskChanges::status_change(TaskStatus::Close, self.clock.utc());
        self.transition(task_id, changes).await
    }

    /// Validates and applies a partial update without any authorization or
    /// transition check. See [`mutation::apply_partial_update`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] on validation failure,
    /// [`TaskLifecycleError::TaskNotFound`], or a store error.
    pub async fn apply_partial_update(
        &self,
        task_id: TaskId,
        changes: TaskChanges,
    ) -> TaskLifecycleResult<TaskPatch> {
        mutation::apply_partial_update(&*self.tasks, task_id, changes).await
    }

    async fn transition(
        &self,
        task_id: TaskId,
        changes: TaskChanges,
    ) -> TaskLifecycleResult<TaskPatch> {
        if let Some(target) = changes.target_status() {
            self.guard_transition(task_id, target).await?;
        }
        let patch = self.apply_partial_update(task_id, changes).await?;
        tracing::info!(task_id = %task_id, status = ?patch.status(), "task status changed");
        Ok(patch)
    }

    async fn guard_transition(&self, task_id: TaskId, target: TaskStatus) -> TaskLifecycleResult<()> {
        if self.policy == TransitionPolicy::Unchecked {
            return Ok(());
        }
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::TaskNotFound(task_id))?;
        let current = task.status();
        if !current.can_transition_to(target) {
            tracing::warn!(
                task_id = %task_id,
                from = %current,
                to = %target,
                "rejected status transition"
            );
            return Err(TaskDomainError::InvalidStateTransition {
                task_id,
                from: current,
                to: target,
            }
            .into());
        }
        Ok(())
    }

    async fn resolve_actor(&self, user_id: UserId) -> TaskLifecycleResult<User> {
        match self.identity.resolve(user_id).await {
            UserLookup::Found(user) => Ok(user),
            UserLookup::NotFound => Err(TaskLifecycleError::UserNotFound(user_id)),
            UserLookup::BackendFailure(err) => Err(TaskLifecycleError::Identity(err)),
        }
    }

    async fn authorize_manager(&self, user_id: UserId) -> TaskLifecycleResult<User> {
        let user = self.resolve_actor(user_id).await?;
        if !user.role().can_manage_tasks() {
            tracing::warn!(user_id = %user_id, role = %user.role(), "user lacks task authority");
            return Err(TaskLifecycleError::NotAuthorized {
                user_id,
                role: user.role(),
            });
        }
        Ok(user)
    }
}
