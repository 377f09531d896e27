// Storage layer for the Flowstate control-plane
// Decision: In-memory only; definitions and instances live for the life of the process

pub mod memory;

pub use memory::{InMemoryStore, InstanceHandle};
