// ============================================================================
// Runtime Module
// Concurrency harness: actors, work queue, snapshot publication
// ============================================================================

mod publisher;
mod session;

pub use publisher::{PublishHandle, SnapshotPublisher};
pub use session::ExchangeSession;
