// Extraction pipelines — orchestration over the pure core.

pub mod batch;
pub mod extract;

pub use self::batch::{run_batch, BatchSummary};
pub use self::extract::{run, DocumentSource, PipelineOutcome};
