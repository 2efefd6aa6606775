//! Workflow automation (webhook) configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for the workflow automation server
#[derive(Clone, Serialize, Deserialize)]
pub struct WorkflowsConfig {
    /// Server root; endpoint paths such as `webhook/import-history` are joined onto it
    #[serde(default)]
    pub base_url: String,
    /// Shared secret used to sign request bodies
    #[serde(default)]
    pub secret: Option<String>,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for WorkflowsConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            secret: None,
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl std::fmt::Debug for WorkflowsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowsConfig")
            .field("base_url", &self.base_url)
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl WorkflowsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}
