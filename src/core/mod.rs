//! Core functionality
//!
//! The bulk import runner and the collaborators it drives: record
//! resolution against the hosted database and workflow webhooks.

pub mod import;
pub mod resolver;
pub mod webhooks;

use crate::config::Config;
use crate::utils::error::Result;
use import::BulkImportRunner;
use resolver::SupabaseClient;
use std::sync::Arc;
use tracing::debug;
use webhooks::{HistoryImportInvoker, WorkflowClient};

/// Wired-up services for one configuration
#[derive(Clone)]
pub struct Services {
    pub supabase: SupabaseClient,
    pub workflows: WorkflowClient,
    pub runner: BulkImportRunner,
}

impl Services {
    /// Build the HTTP clients and a history import runner from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let supabase = SupabaseClient::new(&config.supabase)?;
        let workflows = WorkflowClient::new(&config.workflows)?;

        let shared = Arc::new(supabase.clone());
        let runner = BulkImportRunner::new(
            shared.clone(),
            shared,
            Arc::new(HistoryImportInvoker::new(workflows.clone())),
        )
        .with_delay(config.import.delay());

        debug!("Services initialized");
        Ok(Self {
            supabase,
            workflows,
            runner,
        })
    }
}
