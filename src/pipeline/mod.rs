//! Pipeline components: result directory polling, ingestion loop, run orchestration.

pub mod ingest;
pub mod orchestrator;
pub mod poller;
pub mod seen;

pub use ingest::{IngestionLoop, mark_failed};
pub use orchestrator::{RunHooks, run_growing};
pub use poller::{ResultDirectoryPoller, scan};
pub use seen::SeenSet;
