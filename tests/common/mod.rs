//! Common test utilities
//!
//! [`MockBackends`] starts one mock PostgREST server and one mock workflow
//! server and produces a [`Config`] pointing at both.

pub mod fixtures;

pub use fixtures::MockBackends;

use leadflow::Config;
use leadflow::config::{ImportConfig, LoggingConfig, SupabaseConfig, WorkflowsConfig};

/// Configuration with a short import delay so tests run quickly
pub fn test_config(supabase_url: &str, workflows_url: &str) -> Config {
    Config {
        supabase: SupabaseConfig {
            url: supabase_url.to_string(),
            api_key: "test-anon-key".to_string(),
            timeout: 5,
        },
        workflows: WorkflowsConfig {
            base_url: workflows_url.to_string(),
            timeout: 5,
            ..Default::default()
        },
        import: ImportConfig { delay_ms: 10 },
        logging: LoggingConfig::default(),
    }
}
