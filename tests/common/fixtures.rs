//! Mock servers and canned responses

use super::test_config;
use leadflow::{Config, Services};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct MockBackends {
    pub supabase: MockServer,
    pub workflows: MockServer,
}

impl MockBackends {
    pub async fn start() -> Self {
        Self {
            supabase: MockServer::start().await,
            workflows: MockServer::start().await,
        }
    }

    pub fn config(&self) -> Config {
        test_config(&self.supabase.uri(), &self.workflows.uri())
    }

    pub fn services(&self) -> Services {
        Services::from_config(&self.config()).expect("services from test config")
    }

    /// `clients` row for `client_id` with the given connected account
    pub async fn mount_account(&self, client_id: &str, account: Option<&str>) {
        Mock::given(method("GET"))
            .and(path("/rest/v1/clients"))
            .and(query_param("select", "unipile_account_id"))
            .and(query_param("id", format!("eq.{}", client_id)))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"unipile_account_id": account}])),
            )
            .mount(&self.supabase)
            .await;
    }

    /// Leads of a campaign as `(lead_id, name)` pairs, in resolver order
    pub async fn mount_campaign(&self, campaign_id: &str, leads: &[(i64, &str)]) {
        let rows: Vec<Value> = leads
            .iter()
            .map(|(id, name)| json!({"lead_id": id, "leads": {"id": id, "nome": name}}))
            .collect();

        Mock::given(method("GET"))
            .and(path("/rest/v1/campaign_leads"))
            .and(query_param("campaign_id", format!("eq.{}", campaign_id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(rows))
            .mount(&self.supabase)
            .await;
    }

    /// History import answers `status` for one lead; mount before [`Self::accept_history_imports`]
    pub async fn fail_history_import(&self, lead_id: i64, status: u16) {
        Mock::given(method("POST"))
            .and(path("/webhook/import-history"))
            .and(body_partial_json(json!({"lead_id": lead_id})))
            .respond_with(ResponseTemplate::new(status).set_body_string("workflow error"))
            .mount(&self.workflows)
            .await;
    }

    pub async fn accept_history_imports(&self) {
        Mock::given(method("POST"))
            .and(path("/webhook/import-history"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&self.workflows)
            .await;
    }

    /// JSON bodies posted to the workflow server, in arrival order
    pub async fn workflow_bodies(&self, endpoint_path: &str) -> Vec<Value> {
        self.workflows
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.url.path() == endpoint_path)
            .map(|r| serde_json::from_slice(&r.body).expect("workflow body is JSON"))
            .collect()
    }
}
