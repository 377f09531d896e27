// Services layer for business logic
// Services own the engine operations, calling storage directly

pub mod instance;
pub mod workflow;

pub use instance::InstanceService;
pub use workflow::WorkflowService;
