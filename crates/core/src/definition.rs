// Workflow definition domain types
//
// A definition is the immutable template an instance runs against:
// its states, and the actions that move an instance between them.
// Used by both the validator and the execution engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

fn default_enabled() -> bool {
    true
}

/// A single state of a workflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct State {
    /// Identifier of the state, unique within its definition.
    #[cfg_attr(feature = "openapi", schema(example = "draft"))]
    pub id: String,
    /// Display name of the state.
    #[cfg_attr(feature = "openapi", schema(example = "Draft"))]
    pub name: String,
    /// Optional human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether new instances start in this state. Exactly one state must set this.
    #[serde(default)]
    pub is_initial: bool,
    /// Whether this state is terminal. No action is offered or executable from it.
    #[serde(default)]
    pub is_final: bool,
    /// Whether the state is enabled. Stored but not consulted by the engine.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

/// A transition from one or more source states to exactly one target state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Action {
    /// Identifier of the action, unique within its definition.
    #[cfg_attr(feature = "openapi", schema(example = "submit"))]
    pub id: String,
    /// Display name of the action.
    #[cfg_attr(feature = "openapi", schema(example = "Submit for review"))]
    pub name: String,
    /// Optional human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Disabled actions are never offered and cannot be executed.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// States this action may be executed from.
    #[cfg_attr(feature = "openapi", schema(example = json!(["draft"])))]
    pub from_states: Vec<String>,
    /// State the instance moves to once the action is executed.
    #[cfg_attr(feature = "openapi", schema(example = "review"))]
    pub to_state: String,
}

impl Action {
    /// Whether `state_id` is one of this action's source states
    pub fn starts_from(&self, state_id: &str) -> bool {
        self.from_states.iter().any(|s| s == state_id)
    }
}

/// Candidate definition submitted for registration.
/// Any id supplied by the caller is ignored; the server assigns one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct NewWorkflowDefinition {
    /// Name of the workflow, unique across definitions (case-insensitive).
    #[cfg_attr(feature = "openapi", schema(example = "Document approval"))]
    pub name: String,
    /// Optional human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// All states of the workflow, in display order.
    #[serde(default)]
    pub states: Vec<State>,
    /// All actions of the workflow, in display order.
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl NewWorkflowDefinition {
    /// Turn an accepted candidate into a definition with its server-assigned id.
    pub fn into_definition(self, id: Uuid) -> WorkflowDefinition {
        WorkflowDefinition {
            id,
            name: self.name,
            description: self.description,
            states: self.states,
            actions: self.actions,
            created_at: Utc::now(),
        }
    }
}

/// An accepted, immutable workflow definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct WorkflowDefinition {
    /// Server-assigned unique identifier.
    pub id: Uuid,
    /// Name of the workflow.
    pub name: String,
    /// Optional human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// All states of the workflow.
    pub states: Vec<State>,
    /// All actions of the workflow.
    pub actions: Vec<Action>,
    /// Timestamp when the definition was registered.
    pub created_at: DateTime<Utc>,
}

impl WorkflowDefinition {
    /// The unique initial state. Always present on a registered definition.
    pub fn initial_state(&self) -> Option<&State> {
        self.states.iter().find(|s| s.is_initial)
    }

    pub fn state(&self, state_id: &str) -> Option<&State> {
        self.states.iter().find(|s| s.id == state_id)
    }

    pub fn action(&self, action_id: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.id == action_id)
    }
}
