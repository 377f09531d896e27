// In-memory storage for definitions and instances
// Decision: Two independent DashMaps act as the database (no global lock)
// Decision: Each instance sits behind its own parking_lot Mutex so transitions on
//           one instance serialize while different instances never contend
// Decision: Definitions are immutable and shared as Arc
//
// All data is lost on restart.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use flowstate_core::validation::{duplicate_name, name_key};
use flowstate_core::{Result, WorkflowDefinition, WorkflowError, WorkflowInstance};
use parking_lot::Mutex;
use uuid::Uuid;

/// Shared handle to one instance. Lock it for the whole read-check-mutate of a transition.
pub type InstanceHandle = Arc<Mutex<WorkflowInstance>>;

/// In-memory store for workflow definitions and instances
#[derive(Default)]
pub struct InMemoryStore {
    definitions: DashMap<Uuid, Arc<WorkflowDefinition>>,
    // Lowercased definition name -> definition id
    definition_names: DashMap<String, Uuid>,
    instances: DashMap<Uuid, InstanceHandle>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ============================================
    // Definitions
    // ============================================

    /// Whether a definition is registered under `name_key` (see [`name_key`])
    pub fn definition_name_taken(&self, name_key: &str) -> bool {
        self.definition_names.contains_key(name_key)
    }

    /// Insert an accepted definition.
    ///
    /// Claiming the name and inserting the definition happen under the name's
    /// entry lock, so of two concurrent registrations with the same name only
    /// the first succeeds. An existing id is never overwritten.
    pub fn insert_definition(
        &self,
        definition: WorkflowDefinition,
    ) -> Result<Arc<WorkflowDefinition>> {
        let name_slot = match self.definition_names.entry(name_key(&definition.name)) {
            Entry::Occupied(_) => return Err(duplicate_name(&definition.name)),
            Entry::Vacant(slot) => slot,
        };

        let id = definition.id;
        let definition = Arc::new(definition);
        match self.definitions.entry(id) {
            Entry::Occupied(_) => {
                return Err(WorkflowError::internal(format!(
                    "Workflow definition id collision: {}",
                    id
                )))
            }
            Entry::Vacant(slot) => {
                slot.insert(definition.clone());
            }
        }
        name_slot.insert(id);

        Ok(definition)
    }

    pub fn get_definition(&self, id: Uuid) -> Option<Arc<WorkflowDefinition>> {
        self.definitions.get(&id).map(|d| d.value().clone())
    }

    /// All definitions, ordered by id (creation order for v7 ids)
    pub fn list_definitions(&self) -> Vec<Arc<WorkflowDefinition>> {
        let mut result: Vec<_> = self
            .definitions
            .iter()
            .map(|d| d.value().clone())
            .collect();
        result.sort_by_key(|d| d.id);
        result
    }

    pub fn definition_count(&self) -> usize {
        self.definitions.len()
    }

    // ============================================
    // Instances
    // ============================================

    /// Insert a freshly started instance. An existing id is never overwritten.
    pub fn insert_instance(&self, instance: WorkflowInstance) -> Result<InstanceHandle> {
        match self.instances.entry(instance.id) {
            Entry::Occupied(_) => Err(WorkflowError::internal(format!(
                "Workflow instance id collision: {}",
                instance.id
            ))),
            Entry::Vacant(slot) => {
                let handle = Arc::new(Mutex::new(instance));
                slot.insert(handle.clone());
                Ok(handle)
            }
        }
    }

    /// Handle to an instance. The map guard is released before this returns,
    /// so callers may lock the handle without blocking other instances.
    pub fn get_instance(&self, id: Uuid) -> Option<InstanceHandle> {
        self.instances.get(&id).map(|i| i.value().clone())
    }

    /// Snapshot of all instances, ordered by id
    pub fn list_instances(&self) -> Vec<WorkflowInstance> {
        let handles: Vec<InstanceHandle> = self
            .instances
            .iter()
            .map(|i| i.value().clone())
            .collect();
        let mut result: Vec<_> = handles.iter().map(|h| h.lock().clone()).collect();
        result.sort_by_key(|i| i.id);
        result
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowstate_core::{NewWorkflowDefinition, State};

    fn definition(name: &str) -> WorkflowDefinition {
        NewWorkflowDefinition {
            name: name.to_string(),
            description: None,
            states: vec![State {
                id: "open".to_string(),
                name: "Open".to_string(),
                description: None,
                is_initial: true,
                is_final: false,
                enabled: true,
            }],
            actions: vec![],
        }
        .into_definition(Uuid::now_v7())
    }

    #[test]
    fn test_insert_and_get_definition() {
        let store = InMemoryStore::new();
        let inserted = store.insert_definition(definition("Tickets")).unwrap();

        let fetched = store.get_definition(inserted.id).unwrap();
        assert_eq!(fetched.name, "Tickets");
        assert!(store.definition_name_taken(&name_key("TICKETS")));
        assert!(store.get_definition(Uuid::now_v7()).is_none());
    }

    #[test]
    fn test_duplicate_name_leaves_store_untouched() {
        let store = InMemoryStore::new();
        let first = store.insert_definition(definition("Tickets")).unwrap();

        let err = store.insert_definition(definition("tickets")).unwrap_err();

        assert_eq!(
            err.to_string(),
            "A workflow with the name 'tickets' already exists."
        );
        assert_eq!(store.definition_count(), 1);
        assert_eq!(*store.get_definition(first.id).unwrap(), *first);
    }

    #[test]
    fn test_definition_id_collision_keeps_first() {
        let store = InMemoryStore::new();
        let first = store.insert_definition(definition("Tickets")).unwrap();
        let mut clash = definition("Orders");
        clash.id = first.id;

        let err = store.insert_definition(clash).unwrap_err();

        assert!(matches!(err, WorkflowError::Internal(_)));
        assert_eq!(store.get_definition(first.id).unwrap().name, "Tickets");
        assert!(!store.definition_name_taken(&name_key("Orders")));
    }

    #[test]
    fn test_list_definitions_in_creation_order() {
        let store = InMemoryStore::new();
        let a = store.insert_definition(definition("A")).unwrap();
        let b = store.insert_definition(definition("B")).unwrap();

        let ids: Vec<Uuid> = store.list_definitions().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[test]
    fn test_insert_instance_rejects_id_collision() {
        let store = InMemoryStore::new();
        let def = store.insert_definition(definition("Tickets")).unwrap();
        let initial = def.initial_state().unwrap();
        let id = Uuid::now_v7();

        store
            .insert_instance(WorkflowInstance::start(id, def.id, initial))
            .unwrap();
        let err = store
            .insert_instance(WorkflowInstance::start(id, def.id, initial))
            .unwrap_err();

        assert!(matches!(err, WorkflowError::Internal(_)));
        assert_eq!(store.instance_count(), 1);
    }

    #[test]
    fn test_list_instances_snapshots() {
        let store = InMemoryStore::new();
        let def = store.insert_definition(definition("Tickets")).unwrap();
        let initial = def.initial_state().unwrap();
        let handle = store
            .insert_instance(WorkflowInstance::start(Uuid::now_v7(), def.id, initial))
            .unwrap();

        let listed = store.list_instances();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], *handle.lock());
    }
}
