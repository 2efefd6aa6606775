//! Configuration data models
//!
//! This module defines all configuration structures used by leadflow.

pub mod import;
pub mod logging;
pub mod supabase;
pub mod workflows;

pub use import::*;
pub use logging::*;
pub use supabase::*;
pub use workflows::*;

/// Default request timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default pause between bulk items, tuned to stay under the workflow rate limit
pub fn default_delay_ms() -> u64 {
    3000
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_user_agent() -> String {
    format!("leadflow/{}", env!("CARGO_PKG_VERSION"))
}
