//! HTTP binding for [`TaskboardHandlers`].
//!
//! Each route extracts its path parameters and raw body into an
//! [`ApiRequest`] and dispatches it to the matching [`Operation`].

use super::handlers::{Operation, TaskboardHandlers};
use super::request::{ApiRequest, ApiResponse};
use crate::task::ports::TaskRepository;
use crate::user::ports::UserRepository;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use mockable::Clock;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

type Shared<T, U, C> = Arc<TaskboardHandlers<T, U, C>>;
type PathParameters = HashMap<String, String>;

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, [(header::CONTENT_TYPE, "application/json")], self.body).into_response()
    }
}

/// Builds the Taskboard router.
///
/// | Method | Path | Operation |
/// |---|---|---|
/// | POST | `/users` | [`Operation::CreateUser`] |
/// | POST | `/tasks` | [`Operation::CreateTask`] |
/// | GET | `/tasks/{taskId}` | [`Operation::GetTask`] |
/// | PUT | `/tasks/{taskId}` | [`Operation::UpdateTask`] |
/// | DELETE | `/tasks/{taskId}` | [`Operation::DeleteTask`] |
/// | GET | `/users/{userId}/tasks` | [`Operation::GetAllTasksForAUser`] |
/// | PUT | `/tasks/{taskId}/assign/{userId}` | [`Operation::AssignTaskToAUser`] |
/// | PUT | `/tasks/{taskId}/inprogress` | [`Operation::UpdateTaskToInprogress`] |
/// | PUT | `/tasks/{taskId}/complete` | [`Operation::UpdateTaskToComplete`] |
/// | PUT | `/tasks/{taskId}/close` | [`Operation::UpdateTaskToClose`] |
/// | GET | `/health` | liveness check |
pub fn router<T, U, C>(handlers: Shared<T, U, C>) -> Router
where
    T: TaskRepository + 'static,
    U: UserRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(|| async { Json(json!({ "status": "ok" })) }))
        .route(
            "/users",
            post(|State(h): State<Shared<T, U, C>>, body: String| async move {
                dispatch(&h, Operation::CreateUser, PathParameters::new(), body).await
            }),
        )
        .route(
            "/tasks",
            post(|State(h): State<Shared<T, U, C>>, body: String| async move {
                dispatch(&h, Operation::CreateTask, PathParameters::new(), body).await
            }),
        )
        .route(
            "/users/{userId}/tasks",
            get(
                |State(h): State<Shared<T, U, C>>, Path(p): Path<PathParameters>, body: String| async move {
                    dispatch(&h, Operation::GetAllTasksForAUser, p, body).await
                },
            ),
        )
        .route(
            "/tasks/{taskId}",
            get(
                |State(h): State<Shared<T, U, C>>, Path(p): Path<PathParameters>, body: String| async move {
                    dispatch(&h, Operation::GetTask, p, body).await
                },
            )
            .put(
                |State(h): State<Shared<T, U, C>>, Path(p): Path<PathParameters>, body: String| async move {
                    dispatch(&h, Operation::UpdateTask, p, body).await
                },
            )
            .delete(
                |State(h): State<Shared<T, U, C>>, Path(p): Path<PathParameters>, body: String| async move {
                    dispatch(&h, Operation::DeleteTask, p, body).await
                },
            ),
        )
        .route(
            "/tasks/{taskId}/assign/{userId}",
            put(
                |State(h): State<Shared<T, U, C>>, Path(p): Path<PathParameters>, body: String| async move {
                    dispatch(&h, Operation::AssignTaskToAUser, p, body).await
                },
            ),
        )
        .route(
            "/tasks/{taskId}/inprogress",
            put(
                |State(h): State<Shared<T, U, C>>, Path(p): Path<PathParameters>, body: String| async move {
                    dispatch(&h, Operation::UpdateTaskToInprogress, p, body).await
                },
            ),
        )
        .route(
            "/tasks/{taskId}/complete",
            put(
                |State(h): State<Shared<T, U, C>>, Path(p): Path<PathParameters>, body: String| async move {
                    dispatch(&h, Operation::UpdateTaskToComplete, p, body).await
                },
            ),
        )
        .route(
            "/tasks/{taskId}/close",
            put(
                |State(h): State<Shared<T, U, C>>, Path(p): Path<PathParameters>, body: String| async move {
                    dispatch(&h, Operation::UpdateTaskToClose, p, body).await
                },
            ),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(handlers)
}

async fn dispatch<T, U, C>(
    handlers: &TaskboardHandlers<T, U, C>,
    operation: Operation,
    path_parameters: PathParameters,
    body: String,
) -> ApiResponse
where
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    let request = ApiRequest {
        path_parameters,
        body: (!body.is_empty()).then_some(body),
    };
    handlers.handle(operation, &request).await
}
