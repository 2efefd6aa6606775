//! Single-shot workflow triggers through wired-up services

use crate::common::MockBackends;
use leadflow::core::webhooks::{ContentBriefing, ContentRequest};
use leadflow::{LeadflowError, RecordId, Services};
use serde_json::json;
use wiremock::matchers::{body_json, header_exists, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_sync_recent_sends_quick_sync_action() {
    let backends = MockBackends::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook/sync-recent-manual"))
        .and(body_json(json!({"lead_id": 480, "action": "quick_sync"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&backends.workflows)
        .await;

    backends
        .services()
        .workflows
        .sync_recent(RecordId::Int(480))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_sync_connections_uses_connected_account() {
    let backends = MockBackends::start().await;
    backends.mount_account("3", Some("acc_9")).await;
    Mock::given(method("POST"))
        .and(path("/webhook/sync-connections"))
        .and(body_json(json!({"unipile_account_id": "acc_9", "client_id": "3"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&backends.workflows)
        .await;

    let services = backends.services();
    let account = services.supabase.account_id("3").await.unwrap().unwrap();
    services
        .workflows
        .sync_connections(&account, "3", None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_generate_post_with_briefing() {
    let backends = MockBackends::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/clients"))
        .and(query_param("id", "eq.4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 4,
            "description": "B2B SaaS for clinics",
            "tone_of_voice": "direct",
            "pain_points": "no-shows"
        }])))
        .mount(&backends.supabase)
        .await;
    Mock::given(method("POST"))
        .and(path("/webhook/create-post-workflow"))
        .and(body_json(json!({
            "cliente": "Acme",
            "tema": "pricing",
            "publico": "CFOs",
            "imageUrl": null,
            "clientId": 4,
            "resumo_negocio": "B2B SaaS for clinics",
            "tom_de_voz": "direct",
            "dores": "no-shows"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"post": "draft"})))
        .expect(1)
        .mount(&backends.workflows)
        .await;

    let services = backends.services();
    let profile = services.supabase.client_profile("4").await.unwrap().unwrap();
    let request =
        ContentRequest::new("Acme", "pricing", "CFOs").with_briefing(ContentBriefing::from(profile));

    let answer = services.workflows.generate_content(&request).await.unwrap();
    assert_eq!(answer, json!({"post": "draft"}));
}

#[tokio::test]
async fn test_configured_secret_signs_bulk_requests() {
    let backends = MockBackends::start().await;
    backends.mount_account("12", Some("acc_123")).await;
    backends.mount_campaign("9", &[(480, "Ana")]).await;
    Mock::given(method("POST"))
        .and(path("/webhook/import-history"))
        .and(header_exists("X-Webhook-Signature"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&backends.workflows)
        .await;

    let mut config = backends.config();
    config.workflows.secret = Some("shh".to_string());
    let services = Services::from_config(&config).unwrap();

    let result = services
        .runner
        .run(&leadflow::ImportRequest::new(
            "12",
            leadflow::Selection::all("9"),
        ))
        .await
        .unwrap();
    assert_eq!(result.success_count, 1);
}

#[tokio::test]
async fn test_workflow_error_status_surfaces() {
    let backends = MockBackends::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook/generate-icebreaker"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such workflow"))
        .mount(&backends.workflows)
        .await;

    let err = backends
        .services()
        .workflows
        .generate_icebreaker(RecordId::Int(7), "12")
        .await
        .unwrap_err();

    assert!(matches!(err, LeadflowError::External { status: 404, .. }));
    assert!(!err.is_retryable());
}
