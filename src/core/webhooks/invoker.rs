//! Remote actions performed per bulk item

use super::client::WorkflowClient;
use crate::core::import::{JobContext, TargetIdentifier};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Side-effecting call made once per target
///
/// Implementations own their timeout. Any error, transport or non-success
/// status, counts as a failure of that one item.
#[async_trait]
pub trait RemoteActionInvoker: Send + Sync {
    async fn invoke(&self, target: &TargetIdentifier, context: &JobContext) -> Result<()>;
}

/// Posts each lead to the history import workflow
#[derive(Clone)]
pub struct HistoryImportInvoker {
    client: WorkflowClient,
}

impl HistoryImportInvoker {
    pub fn new(client: WorkflowClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RemoteActionInvoker for HistoryImportInvoker {
    async fn invoke(&self, target: &TargetIdentifier, context: &JobContext) -> Result<()> {
        self.client
            .import_history(target.id.clone(), &context.account_id)
            .await
    }
}
