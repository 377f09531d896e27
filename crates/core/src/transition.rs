// Transition rules
//
// Decides which actions an instance may take from its current state and
// applies a chosen action. Lookup of the instance and its definition is the
// caller's job; everything here works on an already loaded pair.

use chrono::Utc;

use crate::definition::WorkflowDefinition;
use crate::error::{Result, WorkflowError};
use crate::instance::{AvailableAction, HistoryEntry, InstanceView, WorkflowInstance};

/// Actions offered from `current_state_id`, in definition order.
///
/// A final state offers nothing, whatever the actions declare.
pub fn available_actions(
    definition: &WorkflowDefinition,
    current_state_id: &str,
) -> Vec<AvailableAction> {
    if definition
        .state(current_state_id)
        .is_some_and(|state| state.is_final)
    {
        return Vec::new();
    }

    definition
        .actions
        .iter()
        .filter(|action| action.enabled && action.starts_from(current_state_id))
        .map(AvailableAction::from)
        .collect()
}

/// Project an instance into its read-only view.
pub fn instance_view(definition: &WorkflowDefinition, instance: &WorkflowInstance) -> InstanceView {
    InstanceView {
        id: instance.id,
        definition_id: instance.definition_id,
        current_state_id: instance.current_state_id.clone(),
        history: instance.history.clone(),
        available_actions: available_actions(definition, &instance.current_state_id),
    }
}

/// Execute `action_id` on `instance`.
///
/// Checks run in a fixed order and the first failure wins; on failure the
/// instance is left untouched. On success the current state moves to the
/// action's target and one history entry is appended; its index is returned.
pub fn apply_action(
    definition: &WorkflowDefinition,
    instance: &mut WorkflowInstance,
    action_id: &str,
) -> Result<usize> {
    let action = definition
        .action(action_id)
        .ok_or_else(|| WorkflowError::action_not_found(action_id))?;

    let current_state = definition
        .state(&instance.current_state_id)
        .ok_or_else(|| WorkflowError::StateMissing {
            state_id: instance.current_state_id.clone(),
            definition_id: definition.id,
        })?;

    if !action.enabled {
        return Err(WorkflowError::rejected(format!(
            "Action '{}' is disabled.",
            action.id
        )));
    }

    if !action.starts_from(&current_state.id) {
        return Err(WorkflowError::rejected(format!(
            "Action '{}' cannot be executed from the current state '{}'.",
            action.name, current_state.name
        )));
    }

    // Holds even if an action lists a final state among its sources
    if current_state.is_final {
        return Err(WorkflowError::rejected(
            "Cannot execute action on a final state.",
        ));
    }

    let now = Utc::now();
    let entry = HistoryEntry {
        action_id: action.id.clone(),
        from_state_id: current_state.id.clone(),
        to_state_id: action.to_state.clone(),
        timestamp: now,
    };

    instance.current_state_id = action.to_state.clone();
    instance.updated_at = now;
    Ok(instance.history.append(entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{Action, NewWorkflowDefinition, State};
    use crate::error::ErrorKind;
    use uuid::Uuid;

    fn state(id: &str, is_initial: bool, is_final: bool) -> State {
        State {
            id: id.to_string(),
            name: id.to_uppercase(),
            description: None,
            is_initial,
            is_final,
            enabled: true,
        }
    }

    fn action(id: &str, from: &[&str], to: &str, enabled: bool) -> Action {
        Action {
            id: id.to_string(),
            name: id.to_string(),
            description: Some(format!("{} action", id)),
            enabled,
            from_states: from.iter().map(|s| s.to_string()).collect(),
            to_state: to.to_string(),
        }
    }

    fn approval() -> WorkflowDefinition {
        NewWorkflowDefinition {
            name: "Approval".to_string(),
            description: None,
            states: vec![
                state("draft", true, false),
                state("review", false, false),
                state("done", false, true),
            ],
            actions: vec![
                action("submit", &["draft"], "review", true),
                action("withdraw", &["review"], "draft", true),
                action("escalate", &["review"], "review", false),
                action("approve", &["review"], "done", true),
                action("reopen", &["done"], "draft", true),
            ],
        }
        .into_definition(Uuid::now_v7())
    }

    fn start(definition: &WorkflowDefinition) -> WorkflowInstance {
        let initial = definition.initial_state().unwrap();
        WorkflowInstance::start(Uuid::now_v7(), definition.id, initial)
    }

    fn ids(actions: &[AvailableAction]) -> Vec<&str> {
        actions.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn test_available_actions_from_initial_state() {
        let definition = approval();
        let actions = available_actions(&definition, "draft");
        assert_eq!(ids(&actions), vec!["submit"]);
        assert_eq!(actions[0].description.as_deref(), Some("submit action"));
    }

    #[test]
    fn test_available_actions_skip_disabled_and_keep_order() {
        let definition = approval();
        assert_eq!(
            ids(&available_actions(&definition, "review")),
            vec!["withdraw", "approve"]
        );
    }

    #[test]
    fn test_final_state_offers_nothing() {
        // "reopen" lists "done" as a source but is never offered
        let definition = approval();
        assert!(available_actions(&definition, "done").is_empty());
    }

    #[test]
    fn test_apply_action_appends_history() {
        let definition = approval();
        let mut instance = start(&definition);

        let index = apply_action(&definition, &mut instance, "submit").unwrap();

        assert_eq!(index, 0);
        assert_eq!(instance.current_state_id, "review");
        assert_eq!(instance.history.len(), 1);
        let entry = instance.history.get(0).unwrap();
        assert_eq!(entry.action_id, "submit");
        assert_eq!(entry.from_state_id, "draft");
        assert_eq!(entry.to_state_id, "review");
        assert_eq!(instance.updated_at, entry.timestamp);
    }

    #[test]
    fn test_unknown_action_not_found() {
        let definition = approval();
        let mut instance = start(&definition);

        let err = apply_action(&definition, &mut instance, "publish").unwrap_err();

        assert_eq!(err, WorkflowError::action_not_found("publish"));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_unknown_current_state_is_internal() {
        let definition = approval();
        let mut instance = start(&definition);
        instance.current_state_id = "limbo".to_string();

        let err = apply_action(&definition, &mut instance, "submit").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(err.is_dangling_reference());
    }

    #[test]
    fn test_disabled_action_rejected_without_mutation() {
        let definition = approval();
        let mut instance = start(&definition);
        apply_action(&definition, &mut instance, "submit").unwrap();
        let before = instance.clone();

        let err = apply_action(&definition, &mut instance, "escalate").unwrap_err();

        assert_eq!(err.to_string(), "Action 'escalate' is disabled.");
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
        assert_eq!(instance, before);
    }

    #[test]
    fn test_wrong_source_state_rejected_without_mutation() {
        let definition = approval();
        let mut instance = start(&definition);
        let before = instance.clone();

        let err = apply_action(&definition, &mut instance, "approve").unwrap_err();

        assert_eq!(
            err.to_string(),
            "Action 'approve' cannot be executed from the current state 'DRAFT'."
        );
        assert_eq!(instance, before);
    }

    #[test]
    fn test_final_state_rejects_even_listed_action() {
        let definition = approval();
        let mut instance = start(&definition);
        apply_action(&definition, &mut instance, "submit").unwrap();
        apply_action(&definition, &mut instance, "approve").unwrap();
        let before = instance.clone();

        let err = apply_action(&definition, &mut instance, "reopen").unwrap_err();

        assert_eq!(err.to_string(), "Cannot execute action on a final state.");
        assert_eq!(instance, before);
    }

    #[test]
    fn test_disabled_wins_over_wrong_source() {
        // "archive" is disabled and does not start from "draft"
        let mut definition = approval();
        definition
            .actions
            .push(action("archive", &["review"], "done", false));
        let mut instance = start(&definition);
        let before = instance.clone();

        let err = apply_action(&definition, &mut instance, "archive").unwrap_err();

        assert_eq!(err.to_string(), "Action 'archive' is disabled.");
        assert_eq!(instance, before);
    }

    #[test]
    fn test_unknown_action_wins_over_unknown_current_state() {
        let definition = approval();
        let mut instance = start(&definition);
        instance.current_state_id = "limbo".to_string();

        let err = apply_action(&definition, &mut instance, "publish").unwrap_err();

        assert_eq!(err, WorkflowError::action_not_found("publish"));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_first_failing_check_wins() {
        let mut definition = approval();
        definition
            .actions
            .push(action("purge", &["review"], "draft", false));
        let mut instance = start(&definition);

        // Unknown current state comes before disabled and wrong source
        instance.current_state_id = "limbo".to_string();
        let err = apply_action(&definition, &mut instance, "purge").unwrap_err();
        assert!(err.is_dangling_reference());

        // Disabled comes before wrong source
        instance.current_state_id = "draft".to_string();
        let err = apply_action(&definition, &mut instance, "purge").unwrap_err();
        assert_eq!(err.to_string(), "Action 'purge' is disabled.");

        // Wrong source comes before the final-state check
        apply_action(&definition, &mut instance, "submit").unwrap();
        apply_action(&definition, &mut instance, "approve").unwrap();
        let err = apply_action(&definition, &mut instance, "submit").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Action 'submit' cannot be executed from the current state 'DONE'."
        );

        // A final state listed as a source still rejects
        let history_len = instance.history.len();
        let err = apply_action(&definition, &mut instance, "reopen").unwrap_err();
        assert_eq!(err.to_string(), "Cannot execute action on a final state.");
        assert_eq!(instance.history.len(), history_len);
        assert_eq!(instance.current_state_id, "done");
    }

    #[test]
    fn test_instance_view_projection() {
        let definition = approval();
        let mut instance = start(&definition);
        apply_action(&definition, &mut instance, "submit").unwrap();

        let view = instance_view(&definition, &instance);

        assert_eq!(view.id, instance.id);
        assert_eq!(view.definition_id, definition.id);
        assert_eq!(view.current_state_id, "review");
        assert_eq!(view.history, instance.history);
        assert_eq!(ids(&view.available_actions), vec!["withdraw", "approve"]);
    }
}
