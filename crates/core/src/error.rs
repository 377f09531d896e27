// Error types for workflow registration and execution

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for workflow operations
pub type Result<T> = std::result::Result<T, WorkflowError>;

/// Broad category of a [`WorkflowError`], used by the API layer to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced definition, instance or action does not exist
    NotFound,
    /// Invalid definition or a transition the state machine does not allow
    InvalidRequest,
    /// Store-level inconsistency (e.g. an instance whose definition is gone)
    Internal,
}

/// Errors that can occur while registering definitions or driving instances
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowError {
    /// Workflow definition not found
    #[error("Workflow definition not found: {0}")]
    DefinitionNotFound(Uuid),

    /// Workflow instance not found
    #[error("Workflow instance not found: {0}")]
    InstanceNotFound(Uuid),

    /// Action not part of the instance's definition
    #[error("Action '{action_id}' not found in this workflow's definition")]
    ActionNotFound { action_id: String },

    /// Candidate definition rejected by the validator
    #[error("{0}")]
    InvalidDefinition(String),

    /// Transition not allowed from the instance's current state
    #[error("{0}")]
    TransitionRejected(String),

    /// A stored instance references a definition that is not in the store
    #[error("Internal error: workflow definition {definition_id} not found for instance {instance_id}")]
    DefinitionMissing {
        instance_id: Uuid,
        definition_id: Uuid,
    },

    /// An instance's current state is not part of its definition
    #[error("Internal error: current state '{state_id}' not found in definition {definition_id}")]
    StateMissing {
        state_id: String,
        definition_id: Uuid,
    },

    /// Internal consistency error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl WorkflowError {
    /// Create an invalid definition error
    pub fn invalid(msg: impl Into<String>) -> Self {
        WorkflowError::InvalidDefinition(msg.into())
    }

    /// Create a rejected transition error
    pub fn rejected(msg: impl Into<String>) -> Self {
        WorkflowError::TransitionRejected(msg.into())
    }

    /// Create an internal consistency error
    pub fn internal(msg: impl Into<String>) -> Self {
        WorkflowError::Internal(msg.into())
    }

    /// Create an action not found error
    pub fn action_not_found(action_id: impl Into<String>) -> Self {
        WorkflowError::ActionNotFound {
            action_id: action_id.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            WorkflowError::DefinitionNotFound(_)
            | WorkflowError::InstanceNotFound(_)
            | WorkflowError::ActionNotFound { .. } => ErrorKind::NotFound,
            WorkflowError::InvalidDefinition(_) | WorkflowError::TransitionRejected(_) => {
                ErrorKind::InvalidRequest
            }
            WorkflowError::DefinitionMissing { .. }
            | WorkflowError::StateMissing { .. }
            | WorkflowError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Internal error caused by a stored record pointing at something that no longer exists
    pub fn is_dangling_reference(&self) -> bool {
        matches!(
            self,
            WorkflowError::DefinitionMissing { .. } | WorkflowError::StateMissing { .. }
        )
    }
}
