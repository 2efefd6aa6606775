//! Configuration loading from files

use leadflow::{Config, LeadflowError};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_load_full_file() {
    let file = write_config(
        r#"
supabase:
  url: "https://project.supabase.co"
  api_key: "anon"
workflows:
  base_url: "https://n8n.example.com"
  secret: "shh"
import:
  delay_ms: 1500
logging:
  level: "debug"
  json: true
"#,
    );

    let mut config = Config::from_yaml(&std::fs::read_to_string(file.path()).unwrap()).unwrap();
    config.apply_overrides(|_| None).unwrap();
    config.validate().unwrap();

    assert_eq!(config.supabase.rest_url(), "https://project.supabase.co/rest/v1");
    assert_eq!(config.workflows.secret.as_deref(), Some("shh"));
    assert_eq!(config.import.delay(), Duration::from_millis(1500));
    assert!(config.logging.json);
}

#[tokio::test]
async fn test_missing_file_is_config_error() {
    let err = Config::from_file("/nonexistent/leadflow.yaml")
        .await
        .unwrap_err();
    assert!(matches!(err, LeadflowError::Config(_)));
}

#[tokio::test]
async fn test_defaults_fill_optional_sections() {
    let config = Config::from_yaml(
        r#"
supabase:
  url: "https://project.supabase.co"
  api_key: "anon"
workflows:
  base_url: "https://n8n.example.com"
"#,
    )
    .unwrap();

    assert_eq!(config.import.delay(), Duration::from_millis(3000));
    assert_eq!(config.logging.level, "info");
    assert!(config.workflows.secret.is_none());
    config.validate().unwrap();
}

#[tokio::test]
async fn test_invalid_url_rejected() {
    let config = Config::from_yaml(
        r#"
supabase:
  url: "project.supabase.co"
  api_key: "anon"
workflows:
  base_url: "https://n8n.example.com"
"#,
    )
    .unwrap();

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("supabase.url"));
}
