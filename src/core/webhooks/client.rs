//! Workflow webhook client

use super::types::{
    BulkIcebreakerPayload, ConnectionSyncPayload, ContentRequest, HistoryImportPayload,
    IcebreakerPayload, PostLeadsImportPayload, QuickSyncPayload, SearchImportPayload,
    WorkflowEndpoint,
};
use crate::config::WorkflowsConfig;
use crate::core::import::RecordId;
use crate::utils::error::{LeadflowError, Result};
use crate::utils::truncate_string;
use reqwest::{Client, Response};
use serde::Serialize;
use tracing::{debug, info};
use url::Url;

/// Signs request bodies when a secret is configured
pub(super) const SIGNATURE_HEADER: &str = "X-Webhook-Signature";

/// Client for the workflow automation server
#[derive(Clone)]
pub struct WorkflowClient {
    client: Client,
    base_url: Url,
    secret: Option<String>,
}

impl WorkflowClient {
    pub fn new(config: &WorkflowsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| LeadflowError::network(format!("Failed to create HTTP client: {}", e)))?;

        // Url::join drops the last segment unless the base ends with a slash
        let mut base = config.base_url.trim_end_matches('/').to_string();
        base.push('/');
        let base_url = Url::parse(&base)?;

        Ok(Self {
            client,
            base_url,
            secret: config.secret.clone(),
        })
    }

    pub fn endpoint_url(&self, endpoint: WorkflowEndpoint) -> Result<Url> {
        Ok(self.base_url.join(endpoint.path())?)
    }

    /// POST a JSON body and require a 2xx answer
    async fn post<T: Serialize + ?Sized>(
        &self,
        endpoint: WorkflowEndpoint,
        body: &T,
    ) -> Result<Response> {
        let url = self.endpoint_url(endpoint)?;
        let payload = serde_json::to_vec(body)?;

        let mut request = self
            .client
            .post(url.clone())
            .header("Content-Type", "application/json");

        if let Some(secret) = &self.secret {
            request = request.header(SIGNATURE_HEADER, generate_signature(&payload, secret)?);
        }

        debug!("Posting to workflow {}", url);
        let response = request.body(payload).send().await.map_err(|e| {
            if e.is_timeout() {
                LeadflowError::timeout(format!("Workflow {} timed out", endpoint.path()))
            } else {
                LeadflowError::network(format!("Workflow {} unreachable: {}", endpoint.path(), e))
            }
        })?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(LeadflowError::external(
                status.as_u16(),
                truncate_string(&body, 200),
            ))
        }
    }

    /// Fire a workflow; only reachability matters, the body is discarded
    pub async fn trigger<T: Serialize + ?Sized>(
        &self,
        endpoint: WorkflowEndpoint,
        body: &T,
    ) -> Result<()> {
        self.post(endpoint, body).await.map(|_| ())
    }

    /// Start a deep history import for one lead
    pub async fn import_history(&self, lead_id: RecordId, account_id: &str) -> Result<()> {
        let payload = HistoryImportPayload {
            lead_id,
            account_id: account_id.to_string(),
        };
        self.trigger(WorkflowEndpoint::ImportHistory, &payload).await
    }

    /// Quick sync of recent messages for one lead
    pub async fn sync_recent(&self, lead_id: RecordId) -> Result<()> {
        self.trigger(WorkflowEndpoint::SyncRecent, &QuickSyncPayload::new(lead_id))
            .await
    }

    pub async fn generate_icebreaker(&self, lead_id: RecordId, client_id: &str) -> Result<()> {
        let payload = IcebreakerPayload {
            lead_id,
            client_id: client_id.to_string(),
        };
        self.trigger(WorkflowEndpoint::GenerateIcebreaker, &payload)
            .await
    }

    pub async fn sync_connections(
        &self,
        account_id: &str,
        client_id: &str,
        campaign_id: Option<&str>,
    ) -> Result<()> {
        let payload = ConnectionSyncPayload {
            unipile_account_id: account_id.to_string(),
            client_id: client_id.to_string(),
            campaign_id: campaign_id.map(str::to_string),
        };
        self.trigger(WorkflowEndpoint::SyncConnections, &payload)
            .await
    }

    /// One request generating icebreakers for every lead in `lead_ids`
    pub async fn generate_bulk_icebreakers(
        &self,
        lead_ids: Vec<RecordId>,
        client_id: &str,
    ) -> Result<()> {
        if lead_ids.is_empty() {
            return Err(LeadflowError::validation("No leads selected for icebreakers"));
        }
        info!("Requesting icebreakers for {} leads", lead_ids.len());
        let payload = BulkIcebreakerPayload {
            lead_ids,
            client_id: client_id.to_string(),
        };
        self.trigger(WorkflowEndpoint::GenerateBulkIcebreakers, &payload)
            .await
    }

    pub async fn import_post_leads(
        &self,
        post_url: &str,
        campaign_id: &str,
        client_id: &str,
    ) -> Result<()> {
        let payload = PostLeadsImportPayload {
            post_url: non_empty(post_url, "Post URL")?,
            campaign_id: campaign_id.to_string(),
            client_id: client_id.to_string(),
        };
        self.trigger(WorkflowEndpoint::ImportPostLeads, &payload)
            .await
    }

    /// Import a LinkedIn search into a contact list through the client's account
    pub async fn import_linkedin_search(
        &self,
        search_url: &str,
        list_id: &str,
        client_id: &str,
        account_id: &str,
    ) -> Result<()> {
        let payload = SearchImportPayload {
            search_url: non_empty(search_url, "Search URL")?,
            list_id: list_id.to_string(),
            client_id: client_id.to_string(),
            account_id: account_id.to_string(),
        };
        self.trigger(WorkflowEndpoint::ImportLinkedinSearch, &payload)
            .await
    }

    /// Generate a post draft; returns the workflow's JSON answer
    pub async fn generate_content(&self, request: &ContentRequest) -> Result<serde_json::Value> {
        info!("Requesting post generation for {}", request.cliente);
        let response = self.post(WorkflowEndpoint::CreatePost, request).await?;
        Ok(response.json().await?)
    }
}

fn non_empty(value: &str, what: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(LeadflowError::validation(format!("{} cannot be empty", what)));
    }
    Ok(value.to_string())
}

/// `sha256=<hex>` HMAC of the exact request body
pub(super) fn generate_signature(payload: &[u8], secret: &str) -> Result<String> {
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    type HmacSha256 = Hmac<Sha256>;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| LeadflowError::Crypto(e.to_string()))?;

    mac.update(payload);
    let result = mac.finalize();

    Ok(format!("sha256={}", hex::encode(result.into_bytes())))
}
