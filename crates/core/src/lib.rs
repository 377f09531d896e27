// Workflow Core
//
// This crate holds the rules of the workflow engine, free of storage and transport:
// - Domain types for definitions (states, actions) and running instances
// - The definition validator (which candidates are accepted)
// - The transition rules (which actions are offered, how one is applied)
// - The error type shared with the control-plane
//
// Everything is synchronous. Locking and id assignment belong to the caller.

pub mod definition;
pub mod error;
pub mod instance;
pub mod transition;
pub mod validation;

// Re-exports for convenience
pub use definition::{Action, NewWorkflowDefinition, State, WorkflowDefinition};
pub use error::{ErrorKind, Result, WorkflowError};
pub use instance::{AvailableAction, History, HistoryEntry, InstanceView, WorkflowInstance};
pub use transition::{apply_action, available_actions, instance_view};
pub use validation::{name_key, validate_definition};
