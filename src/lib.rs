//! # leadflow
//!
//! Lead sync engine for a sales-ops dashboard. Leads and campaigns live in a
//! Supabase project; LinkedIn history import, message sync, icebreakers and
//! post drafts are produced by workflow-automation webhooks.
//!
//! The centerpiece is [`BulkImportRunner`]: it resolves the leads of a
//! campaign and posts them one at a time to the history import workflow,
//! pausing between requests to stay under the remote rate limit.
//!
//! ```rust,no_run
//! use leadflow::{Config, ImportRequest, Selection, Services};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/leadflow.yaml").await?;
//!     let services = Services::from_config(&config)?;
//!
//!     let request = ImportRequest::new("12", Selection::all("9"));
//!     let result = services.runner.run(&request).await?;
//!     println!("{}", result);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod utils;

pub use config::Config;
pub use crate::core::Services;
pub use crate::core::import::{
    BulkImportRunner, ImportError, ImportEvent, ImportJob, ImportPlan, ImportRequest, JobContext,
    JobPhase, JobResult, RecordId, Selection, TargetIdentifier,
};
pub use utils::error::{LeadflowError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
