//! Supabase (PostgREST) backed resolver

use super::{PrerequisiteLookup, RecordResolver};
use crate::config::SupabaseConfig;
use crate::core::import::{JobContext, RecordId, Selection, TargetIdentifier};
use crate::utils::error::{LeadflowError, Result};
use crate::utils::truncate_string;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

const CLIENTS_TABLE: &str = "clients";
const CAMPAIGN_LEADS_TABLE: &str = "campaign_leads";

/// Thin client over the PostgREST surface of a Supabase project
#[derive(Clone)]
pub struct SupabaseClient {
    client: Client,
    rest_url: String,
    api_key: String,
}

/// Briefing fields of a client used for content generation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientProfile {
    pub id: RecordId,
    pub description: Option<String>,
    pub tone_of_voice: Option<String>,
    pub pain_points: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AccountRow {
    unipile_account_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CampaignLeadRow {
    leads: LeadRow,
}

#[derive(Debug, Deserialize)]
struct LeadRow {
    id: RecordId,
    nome: Option<String>,
}

impl LeadRow {
    fn into_target(self) -> TargetIdentifier {
        let label = match self.nome {
            Some(name) if !name.trim().is_empty() => name,
            _ => format!("Lead #{}", self.id),
        };
        TargetIdentifier::new(self.id, label)
    }
}

impl SupabaseClient {
    pub fn new(config: &SupabaseConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| LeadflowError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            rest_url: config.rest_url(),
            api_key: config.api_key.clone(),
        })
    }

    /// `GET /rest/v1/<table>` with PostgREST query parameters
    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let url = format!("{}/{}", self.rest_url, table);
        debug!("Querying {} with {:?}", table, query);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LeadflowError::timeout(format!("Query on {} timed out", table))
                } else {
                    LeadflowError::network(format!("Query on {} failed: {}", table, e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LeadflowError::storage(format!(
                "{} query returned {}: {}",
                table,
                status.as_u16(),
                truncate_string(&body, 200)
            )));
        }

        Ok(response.json::<Vec<T>>().await?)
    }

    /// Connected account of a client, if any
    pub async fn account_id(&self, client_id: &str) -> Result<Option<String>> {
        let rows: Vec<AccountRow> = self
            .select(
                CLIENTS_TABLE,
                &[
                    ("select", "unipile_account_id".to_string()),
                    ("id", format!("eq.{}", client_id)),
                ],
            )
            .await?;

        Ok(rows
            .into_iter()
            .next()
            .and_then(|row| row.unipile_account_id)
            .filter(|account| !account.trim().is_empty()))
    }

    /// Briefing of a client, `None` when the client does not exist
    pub async fn client_profile(&self, client_id: &str) -> Result<Option<ClientProfile>> {
        let rows: Vec<ClientProfile> = self
            .select(
                CLIENTS_TABLE,
                &[
                    ("select", "id,description,tone_of_voice,pain_points".to_string()),
                    ("id", format!("eq.{}", client_id)),
                ],
            )
            .await?;

        Ok(rows.into_iter().next())
    }

    /// Canonical lead ids of a campaign, optionally restricted to some membership rows
    pub async fn campaign_leads(&self, selection: &Selection) -> Result<Vec<TargetIdentifier>> {
        let mut query = vec![
            ("select", "lead_id,leads!inner(id,nome)".to_string()),
            ("campaign_id", format!("eq.{}", selection.scope)),
        ];
        if !selection.is_all() {
            query.push(("id", format!("in.({})", in_list(&selection.references))));
        }

        let rows: Vec<CampaignLeadRow> = self.select(CAMPAIGN_LEADS_TABLE, &query).await?;
        Ok(rows.into_iter().map(|row| row.leads.into_target()).collect())
    }
}

/// Render ids for a PostgREST `in.(...)` filter
fn in_list(ids: &[RecordId]) -> String {
    ids.iter()
        .map(|id| match id {
            RecordId::Int(n) => n.to_string(),
            RecordId::Text(s) => format!("\"{}\"", s.replace('"', "\\\"")),
        })
        .collect::<Vec<_>>()
        .join(",")
}

#[async_trait]
impl PrerequisiteLookup for SupabaseClient {
    async fn job_context(&self, tenant: &str) -> Result<Option<JobContext>> {
        Ok(self.account_id(tenant).await?.map(JobContext::new))
    }
}

#[async_trait]
impl RecordResolver for SupabaseClient {
    async fn resolve(&self, selection: &Selection) -> Result<Vec<TargetIdentifier>> {
        self.campaign_leads(selection).await
    }
}
