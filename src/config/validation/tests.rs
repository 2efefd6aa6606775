use super::*;

#[test]
fn test_validate_http_url() {
    assert!(validate_http_url("https://abc.supabase.co", "url").is_ok());
    assert!(validate_http_url("http://127.0.0.1:5678", "url").is_ok());

    let err = validate_http_url("", "supabase.url").unwrap_err();
    assert!(err.contains("cannot be empty"));

    let err = validate_http_url("ftp://files.example.com", "workflows.base_url").unwrap_err();
    assert!(err.contains("scheme"));

    assert!(validate_http_url("not a url", "url").is_err());
}

#[test]
fn test_supabase_validation() {
    let mut config = SupabaseConfig {
        url: "https://abc.supabase.co".to_string(),
        api_key: "anon-key".to_string(),
        timeout: 30,
    };
    assert!(config.validate().is_ok());

    config.api_key = "  ".to_string();
    assert!(config.validate().unwrap_err().contains("api_key"));

    config.api_key = "anon-key".to_string();
    config.timeout = 0;
    assert!(config.validate().unwrap_err().contains("timeout"));
}

#[test]
fn test_workflows_validation() {
    let mut config = WorkflowsConfig {
        base_url: "https://n8n.example.com".to_string(),
        ..Default::default()
    };
    assert!(config.validate().is_ok());

    config.secret = Some(String::new());
    assert!(config.validate().unwrap_err().contains("secret"));

    config.secret = None;
    config.base_url = String::new();
    assert!(config.validate().is_err());
}

#[test]
fn test_import_delay_must_be_positive() {
    assert!(ImportConfig::default().validate().is_ok());
    assert!(ImportConfig { delay_ms: 0 }.validate().is_err());
}
