//! Workflow automation webhooks
//!
//! Typed triggers for the automation server plus the remote action used by
//! the bulk import.

mod client;
mod invoker;
mod types;

pub use client::WorkflowClient;
pub use invoker::{HistoryImportInvoker, RemoteActionInvoker};
pub use types::{
    BulkIcebreakerPayload, ConnectionSyncPayload, ContentBriefing, ContentRequest,
    HistoryImportPayload, IcebreakerPayload, PostLeadsImportPayload, QuickSyncPayload,
    SearchImportPayload, WorkflowEndpoint,
};
