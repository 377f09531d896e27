// Workflow definition service
//
// Validates candidates and registers them under a server-assigned id.

use crate::storage::InMemoryStore;
use flowstate_core::{validate_definition, NewWorkflowDefinition, Result, WorkflowDefinition};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

pub struct WorkflowService {
    store: Arc<InMemoryStore>,
}

impl WorkflowService {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }

    /// Validate a candidate definition and register it.
    /// On failure the store is left untouched.
    #[instrument(
        skip(self, candidate),
        fields(workflow.name = %candidate.name, workflow.id = tracing::field::Empty)
    )]
    pub fn create(&self, candidate: NewWorkflowDefinition) -> Result<WorkflowDefinition> {
        validate_definition(&candidate, |key| self.store.definition_name_taken(key))?;

        let definition = candidate.into_definition(Uuid::now_v7());
        let stored = self.store.insert_definition(definition)?;

        tracing::Span::current().record("workflow.id", stored.id.to_string().as_str());
        tracing::info!(
            states = stored.states.len(),
            actions = stored.actions.len(),
            "Workflow definition registered"
        );

        Ok((*stored).clone())
    }

    pub fn get(&self, id: Uuid) -> Option<WorkflowDefinition> {
        self.store.get_definition(id).map(|d| (*d).clone())
    }

    pub fn list(&self) -> Vec<WorkflowDefinition> {
        self.store
            .list_definitions()
            .into_iter()
            .map(|d| (*d).clone())
            .collect()
    }
}
