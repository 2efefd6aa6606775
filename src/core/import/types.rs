//! Bulk import types and data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Backend record identifier
///
/// Serialized in its native JSON type so webhook bodies carry `480`, not `"480"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{}", id),
            RecordId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Int(id)
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        RecordId::Text(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::Text(id.to_string())
    }
}

impl RecordId {
    /// Parse user input, preferring the integer form
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        raw.parse::<i64>()
            .map(RecordId::Int)
            .unwrap_or_else(|_| RecordId::Text(raw.to_string()))
    }
}

/// One record to process, as resolved from the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetIdentifier {
    /// Canonical backend id
    pub id: RecordId,
    /// Display label for progress output
    pub label: String,
}

impl TargetIdentifier {
    pub fn new(id: impl Into<RecordId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Which records of a scope to import
///
/// An empty reference list means every record in the scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Scope the references belong to (a campaign id)
    pub scope: String,
    /// Local references chosen by the operator (campaign membership ids)
    pub references: Vec<RecordId>,
}

impl Selection {
    /// Select everything in `scope`
    pub fn all(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            references: Vec::new(),
        }
    }

    /// Select the given references; duplicates are dropped, first occurrence wins
    pub fn explicit<I, R>(scope: impl Into<String>, references: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RecordId>,
    {
        let mut unique: Vec<RecordId> = Vec::new();
        for reference in references {
            let reference = reference.into();
            if !unique.contains(&reference) {
                unique.push(reference);
            }
        }

        Self {
            scope: scope.into(),
            references: unique,
        }
    }

    pub fn is_all(&self) -> bool {
        self.references.is_empty()
    }
}

/// A request to run one bulk import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRequest {
    /// Tenant (client) whose connected account performs the import
    pub tenant: String,
    pub selection: Selection,
}

impl ImportRequest {
    pub fn new(tenant: impl Into<String>, selection: Selection) -> Self {
        Self {
            tenant: tenant.into(),
            selection,
        }
    }
}

/// Context resolved once per job and shared by every item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobContext {
    /// External account reference (Unipile account id)
    pub account_id: String,
}

impl JobContext {
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
        }
    }
}

/// Runner lifecycle phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobPhase {
    #[default]
    Idle,
    /// Looking up the account and targets, or waiting for the caller to confirm
    Resolving,
    Running,
}

/// Live state of the bulk import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportJob {
    /// Assigned when the job starts running
    pub job_id: Option<Uuid>,
    pub phase: JobPhase,
    pub active: bool,
    pub total: usize,
    /// 1-based index of the item in flight, 0 before the first item
    pub current: usize,
    pub failures: usize,
    pub current_label: String,
    pub started_at: Option<DateTime<Utc>>,
}

impl ImportJob {
    /// Items not yet started
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.current)
    }

    /// Completion ratio in percent, 0 when nothing is scheduled
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.current * 100) / self.total).min(100) as u8
    }
}

/// Summary reported once when a job finishes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobResult {
    pub processed_count: usize,
    pub success_count: usize,
    pub failure_count: usize,
    /// Wall-clock time spent in the running phase
    pub elapsed: Duration,
}

impl JobResult {
    pub fn has_failures(&self) -> bool {
        self.failure_count > 0
    }
}

impl fmt::Display for JobResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} processed: {} succeeded, {} failed",
            self.processed_count, self.success_count, self.failure_count
        )
    }
}

/// Lifecycle notifications published while a job runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportEvent {
    Started {
        job_id: Uuid,
        total: usize,
    },
    ItemStarted {
        index: usize,
        target: TargetIdentifier,
    },
    ItemFailed {
        index: usize,
        target: TargetIdentifier,
        error: String,
    },
    Finished(JobResult),
}

/// Reasons a bulk import never starts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// The tenant has no connected external account
    #[error("No connected account for tenant {tenant}")]
    PrerequisiteMissing { tenant: String },

    /// The selection resolved to zero records
    #[error("Nothing to process in scope {scope}")]
    NothingToProcess { scope: String },

    /// Target resolution itself failed
    #[error("Failed to resolve import targets: {0}")]
    UnexpectedResolverError(String),

    #[error("An import job is already in progress")]
    AlreadyRunning,
}
