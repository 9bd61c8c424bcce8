//! Ingestion and orchestration of the engine stages.

pub mod ingest;
pub mod runner;
pub mod summary;
pub mod types;

pub use ingest::{admit, RawListing};
pub use runner::ValidationPipeline;
pub use summary::RunSummary;
pub use types::{DroppedListing, PipelineOutput, RecordOutcome};
