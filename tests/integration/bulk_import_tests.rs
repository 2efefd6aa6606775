//! Bulk history import over HTTP

use crate::common::MockBackends;
use leadflow::{ImportError, ImportEvent, ImportRequest, JobPhase, Selection};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_import_reports_partial_failure() {
    let backends = MockBackends::start().await;
    backends.mount_account("12", Some("acc_123")).await;
    backends
        .mount_campaign("9", &[(480, "Ana"), (17, "Bruno"), (301, "Caio")])
        .await;
    backends.fail_history_import(17, 500).await;
    backends.accept_history_imports().await;

    let services = backends.services();
    let result = services
        .runner
        .run(&ImportRequest::new("12", Selection::all("9")))
        .await
        .unwrap();

    assert_eq!(result.processed_count, 3);
    assert_eq!(result.success_count, 2);
    assert_eq!(result.failure_count, 1);

    // One request per lead, in resolver order, carrying the connected account
    let bodies = backends.workflow_bodies("/webhook/import-history").await;
    assert_eq!(
        bodies,
        vec![
            json!({"lead_id": 480, "account_id": "acc_123"}),
            json!({"lead_id": 17, "account_id": "acc_123"}),
            json!({"lead_id": 301, "account_id": "acc_123"}),
        ]
    );

    let job = services.runner.snapshot();
    assert!(!job.active);
    assert_eq!(job.phase, JobPhase::Idle);
    assert_eq!(job.current, 3);
    assert_eq!(job.failures, 1);
}

#[tokio::test]
async fn test_import_emits_failure_events() {
    let backends = MockBackends::start().await;
    backends.mount_account("12", Some("acc_123")).await;
    backends.mount_campaign("9", &[(1, "Ana"), (2, "Bruno")]).await;
    backends.fail_history_import(2, 503).await;
    backends.accept_history_imports().await;

    let services = backends.services();
    let mut events = services.runner.events();
    let result = services
        .runner
        .run(&ImportRequest::new("12", Selection::all("9")))
        .await
        .unwrap();

    let mut failed = Vec::new();
    let mut finished = None;
    while let Ok(event) = events.try_recv() {
        match event {
            ImportEvent::ItemFailed { index, target, .. } => failed.push((index, target.label)),
            ImportEvent::Finished(r) => finished = Some(r),
            _ => {}
        }
    }

    assert_eq!(failed, vec![(2, "Bruno".to_string())]);
    assert_eq!(finished, Some(result));
}

#[tokio::test]
async fn test_missing_account_posts_nothing() {
    let backends = MockBackends::start().await;
    backends.mount_account("12", None).await;
    backends.mount_campaign("9", &[(480, "Ana")]).await;
    backends.accept_history_imports().await;

    let services = backends.services();
    let err = services
        .runner
        .run(&ImportRequest::new("12", Selection::all("9")))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ImportError::PrerequisiteMissing {
            tenant: "12".to_string()
        }
    );
    assert!(
        backends
            .workflow_bodies("/webhook/import-history")
            .await
            .is_empty()
    );
    assert!(!services.runner.is_busy());
}

#[tokio::test]
async fn test_empty_campaign_is_nothing_to_process() {
    let backends = MockBackends::start().await;
    backends.mount_account("12", Some("acc_123")).await;
    backends.mount_campaign("9", &[]).await;

    let services = backends.services();
    let err = services
        .runner
        .run(&ImportRequest::new("12", Selection::all("9")))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ImportError::NothingToProcess {
            scope: "9".to_string()
        }
    );
}

#[tokio::test]
async fn test_resolver_failure_is_unexpected_error() {
    let backends = MockBackends::start().await;
    backends.mount_account("12", Some("acc_123")).await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/campaign_leads"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&backends.supabase)
        .await;

    let services = backends.services();
    let err = services
        .runner
        .run(&ImportRequest::new("12", Selection::all("9")))
        .await
        .unwrap_err();

    assert!(matches!(err, ImportError::UnexpectedResolverError(_)));
    assert!(!services.runner.is_busy());
}

#[tokio::test]
async fn test_plan_then_execute() {
    let backends = MockBackends::start().await;
    backends.mount_account("12", Some("acc_123")).await;
    backends
        .mount_campaign("9", &[(480, "Ana"), (301, "Caio")])
        .await;
    backends.accept_history_imports().await;

    let services = backends.services();
    let plan = services
        .runner
        .plan(&ImportRequest::new("12", Selection::all("9")))
        .await
        .unwrap();

    assert_eq!(plan.total(), 2);
    assert_eq!(plan.context().account_id, "acc_123");
    assert!(services.runner.is_busy());

    // A second job is refused while the first one holds the runner
    let err = services
        .runner
        .run(&ImportRequest::new("12", Selection::all("9")))
        .await
        .unwrap_err();
    assert_eq!(err, ImportError::AlreadyRunning);

    let result = plan.execute().await;
    assert_eq!(result.success_count, 2);
    assert!(!services.runner.is_busy());
}
