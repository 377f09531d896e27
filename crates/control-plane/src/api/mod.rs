// HTTP API routes
//
// This module contains all HTTP route handlers for the public API.
// Each submodule handles a specific resource type with its own AppState.

pub mod common;
pub mod instances;
pub mod validation;
pub mod workflows;

use crate::storage::InMemoryStore;
use axum::Router;
use std::sync::Arc;

// Re-export common types
pub use common::{ErrorResponse, ListResponse};

/// All API routes over one shared store
pub fn routes(store: Arc<InMemoryStore>) -> Router {
    let workflows_state = workflows::AppState::new(store.clone());
    let instances_state = instances::AppState::new(store);

    Router::new()
        .merge(workflows::routes(workflows_state))
        .merge(instances::routes(instances_state))
}
