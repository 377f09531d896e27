// Workflow instance HTTP routes

use crate::services::InstanceService;
use crate::storage::InMemoryStore;
use axum::{
    extract::{OriginalUri, Path, State},
    http::{header, StatusCode, Uri},
    routing::{get, post},
    Json, Router,
};
use flowstate_core::{InstanceView, WorkflowInstance};
use std::sync::Arc;
use uuid::Uuid;

use super::common::{error_response, location, ApiError, ErrorResponse, ListResponse};

/// App state for instance routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<InstanceService>,
}

impl AppState {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self {
            service: Arc::new(InstanceService::new(store)),
        }
    }
}

/// Create instance routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/workflows/:workflow_id/instances", post(start_instance))
        .route("/v1/instances", get(list_instances))
        .route("/v1/instances/:instance_id", get(get_instance))
        .route(
            "/v1/instances/:instance_id/actions/:action_id",
            post(execute_action),
        )
        .with_state(state)
}

/// POST /v1/workflows/{workflow_id}/instances - Start a new instance
#[utoipa::path(
    post,
    path = "/v1/workflows/{workflow_id}/instances",
    params(
        ("workflow_id" = Uuid, Path, description = "Workflow definition ID")
    ),
    responses(
        (status = 201, description = "Instance started at the initial state", body = WorkflowInstance),
        (status = 404, description = "Workflow definition not found", body = ErrorResponse)
    ),
    tag = "instances"
)]
pub async fn start_instance(
    State(state): State<AppState>,
    OriginalUri(original): OriginalUri,
    uri: Uri,
    Path(workflow_id): Path<Uuid>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<WorkflowInstance>), ApiError> {
    let instance = state.service.start(workflow_id).map_err(error_response)?;
    let location = location(
        &original,
        &uri,
        &format!("/v1/instances/{}", instance.id),
    );

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(instance),
    ))
}

/// GET /v1/instances - List all instances
#[utoipa::path(
    get,
    path = "/v1/instances",
    responses(
        (status = 200, description = "List of instances", body = ListResponse<WorkflowInstance>)
    ),
    tag = "instances"
)]
pub async fn list_instances(State(state): State<AppState>) -> Json<ListResponse<WorkflowInstance>> {
    Json(ListResponse::new(state.service.list()))
}

/// GET /v1/instances/{instance_id} - Get instance with its available actions
#[utoipa::path(
    get,
    path = "/v1/instances/{instance_id}",
    params(
        ("instance_id" = Uuid, Path, description = "Instance ID")
    ),
    responses(
        (status = 200, description = "Instance found", body = InstanceView),
        (status = 404, description = "Instance or its definition not found", body = ErrorResponse)
    ),
    tag = "instances"
)]
pub async fn get_instance(
    State(state): State<AppState>,
    Path(instance_id): Path<Uuid>,
) -> Result<Json<InstanceView>, ApiError> {
    let view = state
        .service
        .get_view(instance_id)
        .map_err(error_response)?;
    Ok(Json(view))
}

/// POST /v1/instances/{instance_id}/actions/{action_id} - Execute an action
#[utoipa::path(
    post,
    path = "/v1/instances/{instance_id}/actions/{action_id}",
    params(
        ("instance_id" = Uuid, Path, description = "Instance ID"),
        ("action_id" = String, Path, description = "Action ID from the instance's definition")
    ),
    responses(
        (status = 200, description = "Action executed", body = WorkflowInstance),
        (status = 400, description = "Action disabled or not allowed from the current state", body = ErrorResponse),
        (status = 404, description = "Instance or action not found", body = ErrorResponse)
    ),
    tag = "instances"
)]
pub async fn execute_action(
    State(state): State<AppState>,
    Path((instance_id, action_id)): Path<(Uuid, String)>,
) -> Result<Json<WorkflowInstance>, ApiError> {
    let instance = state
        .service
        .execute(instance_id, &action_id)
        .map_err(error_response)?;
    Ok(Json(instance))
}
