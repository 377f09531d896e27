// OpenAPI specification generation
//
// This module defines the OpenAPI spec for the Flowstate API.
// It can be used by both the API server (for Swagger UI)
// and the export-openapi binary (for static spec generation).

use crate::api;
use crate::api::{ErrorResponse, ListResponse};
use flowstate_core::{
    Action, AvailableAction, HistoryEntry, InstanceView, NewWorkflowDefinition, State,
    WorkflowDefinition, WorkflowInstance,
};
use utoipa::OpenApi;

/// OpenAPI documentation for the Flowstate API
#[derive(OpenApi)]
#[openapi(
    paths(
        api::workflows::create_workflow,
        api::workflows::list_workflows,
        api::workflows::get_workflow,
        api::instances::start_instance,
        api::instances::list_instances,
        api::instances::get_instance,
        api::instances::execute_action,
    ),
    components(
        schemas(
            // Definition types
            State, Action, NewWorkflowDefinition, WorkflowDefinition,
            // Instance types
            HistoryEntry, AvailableAction, WorkflowInstance, InstanceView,
            ErrorResponse,
            ListResponse<WorkflowDefinition>,
            ListResponse<WorkflowInstance>,
        )
    ),
    tags(
        (name = "workflows", description = "Workflow definition endpoints"),
        (name = "instances", description = "Workflow instance endpoints")
    ),
    info(
        title = "Flowstate API",
        version = "0.1.0",
        description = "API for registering workflow definitions and driving their instances",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate the OpenAPI spec as a pretty-printed JSON string
    pub fn to_json() -> serde_json::Result<String> {
        Self::openapi().to_pretty_json()
    }
}
