// Input validation for workflow APIs
//
// Last-resort size limits, checked before a definition reaches the validator.
// These are hard limits, not configurable.

use super::common::ErrorResponse;
use axum::http::StatusCode;
use axum::Json;
use flowstate_core::NewWorkflowDefinition;

// =============================================================================
// Input Size Limits
// =============================================================================

/// Maximum size for a workflow name.
pub const MAX_WORKFLOW_NAME_BYTES: usize = 2 * 1024; // 2 KB

/// Maximum size for any description field (workflow, state or action).
pub const MAX_DESCRIPTION_BYTES: usize = 10 * 1024; // 10 KB

/// Maximum number of states in one definition.
pub const MAX_WORKFLOW_STATES: usize = 1000;

/// Maximum number of actions in one definition.
pub const MAX_WORKFLOW_ACTIONS: usize = 1000;

/// Generic validation error message returned to clients.
pub const VALIDATION_ERROR_MESSAGE: &str = "Input exceeds allowed limits";

// =============================================================================
// Validation Functions
// =============================================================================

/// Validation error - returns generic message to avoid leaking details
pub struct ValidationError;

impl From<ValidationError> for (StatusCode, Json<ErrorResponse>) {
    fn from(_: ValidationError) -> Self {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(VALIDATION_ERROR_MESSAGE)),
        )
    }
}

fn validate_description(description: Option<&str>) -> Result<(), ValidationError> {
    if let Some(desc) = description {
        if desc.len() > MAX_DESCRIPTION_BYTES {
            tracing::warn!(
                "Description exceeds limit: {} bytes (max: {})",
                desc.len(),
                MAX_DESCRIPTION_BYTES
            );
            return Err(ValidationError);
        }
    }
    Ok(())
}

/// Validate the size of a workflow definition payload
pub fn validate_create_workflow_input(req: &NewWorkflowDefinition) -> Result<(), ValidationError> {
    if req.name.len() > MAX_WORKFLOW_NAME_BYTES {
        tracing::warn!(
            "Workflow name exceeds limit: {} bytes (max: {})",
            req.name.len(),
            MAX_WORKFLOW_NAME_BYTES
        );
        return Err(ValidationError);
    }
    if req.states.len() > MAX_WORKFLOW_STATES {
        tracing::warn!(
            "Workflow states count exceeds limit: {} (max: {})",
            req.states.len(),
            MAX_WORKFLOW_STATES
        );
        return Err(ValidationError);
    }
    if req.actions.len() > MAX_WORKFLOW_ACTIONS {
        tracing::warn!(
            "Workflow actions count exceeds limit: {} (max: {})",
            req.actions.len(),
            MAX_WORKFLOW_ACTIONS
        );
        return Err(ValidationError);
    }

    validate_description(req.description.as_deref())?;
    for state in &req.states {
        validate_description(state.description.as_deref())?;
    }
    for action in &req.actions {
        validate_description(action.description.as_deref())?;
    }
    Ok(())
}
