// Workflow instance domain types
//
// An instance is one running execution of a definition. It only records
// a state id and its transition history; both are interpreted against the
// owning definition on every operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::definition::{Action, State};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Record of one applied transition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct HistoryEntry {
    /// Action that fired.
    pub action_id: String,
    /// State the instance left.
    pub from_state_id: String,
    /// State the instance entered.
    pub to_state_id: String,
    /// When the transition was applied.
    pub timestamp: DateTime<Utc>,
}

/// Append-only transition log of a single instance.
///
/// Entries are addressed by their insertion index and never removed or
/// rewritten. Callers must hold the owning instance's lock to append.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return its index in the log.
    pub fn append(&mut self, entry: HistoryEntry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[HistoryEntry] {
        &self.entries
    }
}

/// A running execution of a workflow definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct WorkflowInstance {
    /// Server-assigned unique identifier.
    pub id: Uuid,
    /// ID of the definition this instance runs against.
    pub definition_id: Uuid,
    /// ID of the state the instance is currently in.
    #[cfg_attr(feature = "openapi", schema(example = "draft"))]
    pub current_state_id: String,
    /// Transitions applied so far, oldest first.
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<HistoryEntry>))]
    pub history: History,
    /// Timestamp when the instance was started.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last applied transition (or start).
    pub updated_at: DateTime<Utc>,
}

impl WorkflowInstance {
    /// Create an instance seeded at `initial_state`, with empty history.
    pub fn start(id: Uuid, definition_id: Uuid, initial_state: &State) -> Self {
        let now = Utc::now();
        Self {
            id,
            definition_id,
            current_state_id: initial_state.id.clone(),
            history: History::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// An action that can be executed from the instance's current state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AvailableAction {
    #[cfg_attr(feature = "openapi", schema(example = "submit"))]
    pub id: String,
    #[cfg_attr(feature = "openapi", schema(example = "Submit for review"))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&Action> for AvailableAction {
    fn from(action: &Action) -> Self {
        Self {
            id: action.id.clone(),
            name: action.name.clone(),
            description: action.description.clone(),
        }
    }
}

/// Read-only projection of an instance together with the actions it currently offers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct InstanceView {
    pub id: Uuid,
    pub definition_id: Uuid,
    pub current_state_id: String,
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<HistoryEntry>))]
    pub history: History,
    /// Actions executable from the current state, in definition order.
    pub available_actions: Vec<AvailableAction>,
}
