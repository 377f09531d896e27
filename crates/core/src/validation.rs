// Definition validation
//
// Rules are checked in a fixed order and the first failing rule wins:
// 1. name not already registered (case-insensitive)
// 2. exactly one initial state
// 3. unique state ids
// 4. unique action ids
// 5. every action's to_state and from_states name a declared state
//
// Final states with outgoing actions and unreachable states are allowed.

use std::collections::HashSet;

use crate::definition::NewWorkflowDefinition;
use crate::error::{Result, WorkflowError};

/// Key under which a definition name is registered.
/// Names collide when their keys are equal.
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

/// Error returned when a definition name is already taken
pub fn duplicate_name(name: &str) -> WorkflowError {
    WorkflowError::invalid(format!("A workflow with the name '{}' already exists.", name))
}

/// Validate a candidate definition.
///
/// `name_taken` reports whether a definition with the given name key is
/// already registered. Nothing is mutated; on success the caller is free
/// to assign an id and store the definition.
pub fn validate_definition<F>(candidate: &NewWorkflowDefinition, name_taken: F) -> Result<()>
where
    F: Fn(&str) -> bool,
{
    if name_taken(&name_key(&candidate.name)) {
        return Err(reject(duplicate_name(&candidate.name)));
    }

    let initial_count = candidate.states.iter().filter(|s| s.is_initial).count();
    if initial_count != 1 {
        return Err(reject(WorkflowError::invalid(
            "Workflow definition must have exactly one initial state.",
        )));
    }

    let mut state_ids = HashSet::with_capacity(candidate.states.len());
    if !candidate.states.iter().all(|s| state_ids.insert(s.id.as_str())) {
        return Err(reject(WorkflowError::invalid(
            "Duplicate state IDs are not allowed.",
        )));
    }

    let mut action_ids = HashSet::with_capacity(candidate.actions.len());
    if !candidate.actions.iter().all(|a| action_ids.insert(a.id.as_str())) {
        return Err(reject(WorkflowError::invalid(
            "Duplicate action IDs are not allowed.",
        )));
    }

    for action in &candidate.actions {
        if !state_ids.contains(action.to_state.as_str()) {
            return Err(reject(WorkflowError::invalid(format!(
                "Action '{}' has an invalid to_state '{}'.",
                action.id, action.to_state
            ))));
        }

        if let Some(from) = action
            .from_states
            .iter()
            .find(|s| !state_ids.contains(s.as_str()))
        {
            return Err(reject(WorkflowError::invalid(format!(
                "Action '{}' has an invalid from_state '{}'.",
                action.id, from
            ))));
        }
    }

    Ok(())
}

fn reject(err: WorkflowError) -> WorkflowError {
    tracing::warn!(error = %err, "Workflow definition rejected");
    err
}
