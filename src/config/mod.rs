//! Configuration management
//!
//! Configuration is read from a YAML file and can be overridden from the
//! environment. Every section is validated before use.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{LeadflowError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub supabase: SupabaseConfig,
    #[serde(default)]
    pub workflows: WorkflowsConfig,
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file, apply environment overrides and validate
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| LeadflowError::config(format!("Failed to read config file: {}", e)))?;

        let mut config = Self::from_yaml(&content)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse without validating
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| LeadflowError::config(format!("Failed to parse config: {}", e)))
    }

    /// Apply overrides from a key lookup (normally the process environment)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("SUPABASE_URL") {
            self.supabase.url = url;
        }
        if let Some(key) = lookup("SUPABASE_API_KEY") {
            self.supabase.api_key = key;
        }
        if let Some(base_url) = lookup("WORKFLOWS_BASE_URL") {
            self.workflows.base_url = base_url;
        }
        if let Some(secret) = lookup("WORKFLOWS_SECRET") {
            self.workflows.secret = Some(secret);
        }
        if let Some(delay) = lookup("IMPORT_DELAY_MS") {
            self.import.delay_ms = delay
                .parse()
                .map_err(|e| LeadflowError::config(format!("Invalid IMPORT_DELAY_MS: {}", e)))?;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(json) = lookup("LOG_JSON") {
            self.logging.json = json
                .parse()
                .map_err(|e| LeadflowError::config(format!("Invalid LOG_JSON: {}", e)))?;
        }
        Ok(())
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.supabase
            .validate()
            .map_err(|e| LeadflowError::config(format!("Supabase config error: {}", e)))?;
        self.workflows
            .validate()
            .map_err(|e| LeadflowError::config(format!("Workflows config error: {}", e)))?;
        self.import
            .validate()
            .map_err(|e| LeadflowError::config(format!("Import config error: {}", e)))?;
        self.logging
            .validate()
            .map_err(|e| LeadflowError::config(format!("Logging config error: {}", e)))?;

        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| LeadflowError::config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
