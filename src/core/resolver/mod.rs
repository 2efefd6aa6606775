//! Record resolution and job prerequisites
//!
//! The runner never assumes that the references an operator selects are the
//! ids the workflows expect. Resolution maps them to canonical ids in a
//! separate read-only step.

mod supabase;


pub use supabase::{ClientProfile, SupabaseClient};

use crate::core::import::{JobContext, Selection, TargetIdentifier};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Looks up the context a job needs before any item is processed
#[async_trait]
pub trait PrerequisiteLookup: Send + Sync {
    /// `Ok(None)` when the tenant has no connected account
    async fn job_context(&self, tenant: &str) -> Result<Option<JobContext>>;
}

/// Maps a selection to canonical target ids, in a stable order
#[async_trait]
pub trait RecordResolver: Send + Sync {
    async fn resolve(&self, selection: &Selection) -> Result<Vec<TargetIdentifier>>;
}
