// Workflow instance service
//
// Starts instances and drives them through their definition's transitions.
// A transition holds the instance's own lock from the state check through
// the history append, so concurrent executes on one instance serialize.

use crate::storage::InMemoryStore;
use flowstate_core::{
    apply_action, instance_view, InstanceView, Result, WorkflowDefinition, WorkflowError,
    WorkflowInstance,
};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

pub struct InstanceService {
    store: Arc<InMemoryStore>,
}

impl InstanceService {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }

    /// Start a new instance of `definition_id` at its initial state
    #[instrument(skip(self), fields(instance.id = tracing::field::Empty))]
    pub fn start(&self, definition_id: Uuid) -> Result<WorkflowInstance> {
        let definition = self
            .store
            .get_definition(definition_id)
            .ok_or(WorkflowError::DefinitionNotFound(definition_id))?;

        let initial_state = definition.initial_state().ok_or_else(|| {
            WorkflowError::internal(format!(
                "Workflow definition {} has no initial state",
                definition_id
            ))
        })?;

        let instance = WorkflowInstance::start(Uuid::now_v7(), definition.id, initial_state);
        let handle = self.store.insert_instance(instance)?;
        let instance = handle.lock().clone();

        tracing::Span::current().record("instance.id", instance.id.to_string().as_str());
        tracing::info!(state = %instance.current_state_id, "Workflow instance started");

        Ok(instance)
    }

    pub fn list(&self) -> Vec<WorkflowInstance> {
        self.store.list_instances()
    }

    /// Instance with the actions currently available to it
    pub fn get_view(&self, instance_id: Uuid) -> Result<InstanceView> {
        let handle = self
            .store
            .get_instance(instance_id)
            .ok_or(WorkflowError::InstanceNotFound(instance_id))?;
        let instance = handle.lock();
        let definition = self.definition_for(&instance)?;

        Ok(instance_view(&definition, &instance))
    }

    /// Execute `action_id` on the instance and return its new state
    #[instrument(skip(self))]
    pub fn execute(&self, instance_id: Uuid, action_id: &str) -> Result<WorkflowInstance> {
        let handle = self
            .store
            .get_instance(instance_id)
            .ok_or(WorkflowError::InstanceNotFound(instance_id))?;
        let mut instance = handle.lock();
        let definition = self.definition_for(&instance)?;

        let index = apply_action(&definition, &mut instance, action_id).inspect_err(|e| {
            tracing::warn!(error = %e, state = %instance.current_state_id, "Action rejected");
        })?;

        if let Some(entry) = instance.history.get(index) {
            tracing::info!(
                from = %entry.from_state_id,
                to = %entry.to_state_id,
                history_len = instance.history.len(),
                "Action executed"
            );
        }

        Ok(instance.clone())
    }

    fn definition_for(&self, instance: &WorkflowInstance) -> Result<Arc<WorkflowDefinition>> {
        self.store
            .get_definition(instance.definition_id)
            .ok_or_else(|| {
                tracing::error!(
                    instance_id = %instance.id,
                    definition_id = %instance.definition_id,
                    "Instance references a missing workflow definition"
                );
                WorkflowError::DefinitionMissing {
                    instance_id: instance.id,
                    definition_id: instance.definition_id,
                }
            })
    }
}
