//! Sequential bulk import
//!
//! Resolves the leads of a campaign, then hands them one at a time to a
//! remote action with a fixed pause in between, publishing progress as it
//! goes.

mod pacer;
mod runner;
mod types;


pub use pacer::{Pacer, TokioPacer};
pub use runner::{BulkImportRunner, ImportPlan};
pub use types::{
    ImportError, ImportEvent, ImportJob, ImportRequest, JobContext, JobPhase, JobResult,
    RecordId, Selection, TargetIdentifier,
};
