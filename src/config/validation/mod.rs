//! Configuration validation
//!
//! Every configuration section implements [`Validate`]; errors are plain
//! strings that the caller wraps with the section name.

#[cfg(test)]
mod tests;

use super::models::{ImportConfig, LoggingConfig, SupabaseConfig, WorkflowsConfig};
use url::Url;

/// A configuration section that can check itself
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Check that `value` is an absolute http(s) URL with a host
pub fn validate_http_url(value: &str, context: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} cannot be empty", context));
    }

    let url = Url::parse(value).map_err(|e| format!("{} has invalid URL format: {}", context, e))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(format!(
                "{} must use http:// or https:// scheme, got: {}",
                context, scheme
            ));
        }
    }

    if url.host_str().is_none() {
        return Err(format!("{} URL must have a valid host", context));
    }

    Ok(())
}

impl Validate for SupabaseConfig {
    fn validate(&self) -> Result<(), String> {
        validate_http_url(&self.url, "supabase.url")?;

        if self.api_key.trim().is_empty() {
            return Err("supabase.api_key cannot be empty".to_string());
        }

        if self.timeout == 0 {
            return Err("supabase.timeout cannot be 0".to_string());
        }

        Ok(())
    }
}

impl Validate for WorkflowsConfig {
    fn validate(&self) -> Result<(), String> {
        validate_http_url(&self.base_url, "workflows.base_url")?;

        if self.timeout == 0 {
            return Err("workflows.timeout cannot be 0".to_string());
        }

        if let Some(secret) = &self.secret {
            if secret.is_empty() {
                return Err("workflows.secret cannot be empty when set".to_string());
            }
        }

        if self.user_agent.trim().is_empty() {
            return Err("workflows.user_agent cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Validate for ImportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.delay_ms == 0 {
            return Err("import.delay_ms cannot be 0".to_string());
        }
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("logging.level cannot be empty".to_string());
        }
        Ok(())
    }
}
