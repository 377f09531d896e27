// Workflow definition HTTP routes

use crate::services::WorkflowService;
use crate::storage::InMemoryStore;
use axum::{
    extract::{OriginalUri, Path, State},
    http::{header, StatusCode, Uri},
    routing::{get, post},
    Json, Router,
};
use flowstate_core::{NewWorkflowDefinition, WorkflowDefinition};
use std::sync::Arc;
use uuid::Uuid;

use super::common::{error_response, location, ApiError, ErrorResponse, ListResponse};
use super::validation::validate_create_workflow_input;

/// App state for workflow routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<WorkflowService>,
}

impl AppState {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self {
            service: Arc::new(WorkflowService::new(store)),
        }
    }
}

/// Create workflow routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/workflows", post(create_workflow).get(list_workflows))
        .route("/v1/workflows/:workflow_id", get(get_workflow))
        .with_state(state)
}

/// POST /v1/workflows - Register a new workflow definition
#[utoipa::path(
    post,
    path = "/v1/workflows",
    request_body = NewWorkflowDefinition,
    responses(
        (status = 201, description = "Workflow definition created", body = WorkflowDefinition),
        (status = 400, description = "Invalid workflow definition", body = ErrorResponse)
    ),
    tag = "workflows"
)]
pub async fn create_workflow(
    State(state): State<AppState>,
    OriginalUri(original): OriginalUri,
    uri: Uri,
    Json(req): Json<NewWorkflowDefinition>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<WorkflowDefinition>), ApiError> {
    validate_create_workflow_input(&req)?;

    let definition = state.service.create(req).map_err(error_response)?;
    let location = location(
        &original,
        &uri,
        &format!("/v1/workflows/{}", definition.id),
    );

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(definition),
    ))
}

/// GET /v1/workflows - List all workflow definitions
#[utoipa::path(
    get,
    path = "/v1/workflows",
    responses(
        (status = 200, description = "List of workflow definitions", body = ListResponse<WorkflowDefinition>)
    ),
    tag = "workflows"
)]
pub async fn list_workflows(State(state): State<AppState>) -> Json<ListResponse<WorkflowDefinition>> {
    Json(ListResponse::new(state.service.list()))
}

/// GET /v1/workflows/{workflow_id} - Get workflow definition by ID
#[utoipa::path(
    get,
    path = "/v1/workflows/{workflow_id}",
    params(
        ("workflow_id" = Uuid, Path, description = "Workflow definition ID")
    ),
    responses(
        (status = 200, description = "Workflow definition found", body = WorkflowDefinition),
        (status = 404, description = "Workflow definition not found", body = ErrorResponse)
    ),
    tag = "workflows"
)]
pub async fn get_workflow(
    State(state): State<AppState>,
    Path(workflow_id): Path<Uuid>,
) -> Result<Json<WorkflowDefinition>, ApiError> {
    let definition = state.service.get(workflow_id).ok_or_else(|| {
        ErrorResponse::new(format!("Workflow definition not found: {}", workflow_id))
            .into_response(StatusCode::NOT_FOUND)
    })?;

    Ok(Json(definition))
}
