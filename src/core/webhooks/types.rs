//! Workflow webhook type definitions

use crate::core::import::RecordId;
use crate::core::resolver::ClientProfile;
use serde::{Deserialize, Serialize};

/// Endpoints exposed by the automation server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkflowEndpoint {
    /// Deep import of a lead's conversation history
    ImportHistory,
    /// Quick check for new messages of one lead
    SyncRecent,
    /// Personalized opening message for a lead
    GenerateIcebreaker,
    /// Pull the LinkedIn connections of a client account
    SyncConnections,
    /// Draft a post from a theme and the client briefing
    CreatePost,
    /// Icebreakers for several leads in one request
    GenerateBulkIcebreakers,
    /// Add the people engaging with a LinkedIn post to a campaign
    ImportPostLeads,
    /// Fill a contact list from a LinkedIn search
    ImportLinkedinSearch,
}

impl WorkflowEndpoint {
    /// Path relative to the server root
    pub fn path(&self) -> &'static str {
        match self {
            WorkflowEndpoint::ImportHistory => "webhook/import-history",
            WorkflowEndpoint::SyncRecent => "webhook/sync-recent-manual",
            WorkflowEndpoint::GenerateIcebreaker => "webhook/generate-icebreaker",
            WorkflowEndpoint::SyncConnections => "webhook/sync-connections",
            WorkflowEndpoint::CreatePost => "webhook/create-post-workflow",
            WorkflowEndpoint::GenerateBulkIcebreakers => "webhook/generate-bulk-icebreakers",
            WorkflowEndpoint::ImportPostLeads => "webhook/import-post-leads",
            WorkflowEndpoint::ImportLinkedinSearch => "webhook/import-linkedin-search",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryImportPayload {
    pub lead_id: RecordId,
    pub account_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickSyncPayload {
    pub lead_id: RecordId,
    pub action: String,
}

impl QuickSyncPayload {
    pub fn new(lead_id: RecordId) -> Self {
        Self {
            lead_id,
            action: "quick_sync".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IcebreakerPayload {
    pub lead_id: RecordId,
    pub client_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSyncPayload {
    pub unipile_account_id: String,
    pub client_id: String,
    /// Set when the sync is started from a campaign
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkIcebreakerPayload {
    pub lead_ids: Vec<RecordId>,
    pub client_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostLeadsImportPayload {
    pub post_url: String,
    pub campaign_id: String,
    pub client_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchImportPayload {
    pub search_url: String,
    pub list_id: String,
    pub client_id: String,
    pub account_id: String,
}

/// Client briefing injected into post generation requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBriefing {
    #[serde(rename = "clientId")]
    pub client_id: RecordId,
    pub resumo_negocio: Option<String>,
    pub tom_de_voz: Option<String>,
    pub dores: Option<String>,
}

impl From<ClientProfile> for ContentBriefing {
    fn from(profile: ClientProfile) -> Self {
        Self {
            client_id: profile.id,
            resumo_negocio: profile.description,
            tom_de_voz: profile.tone_of_voice,
            dores: profile.pain_points,
        }
    }
}

/// Post generation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRequest {
    /// Client display name
    pub cliente: String,
    /// Theme of the post
    pub tema: String,
    /// Target audience
    pub publico: String,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub briefing: Option<ContentBriefing>,
}

impl ContentRequest {
    pub fn new(
        cliente: impl Into<String>,
        tema: impl Into<String>,
        publico: impl Into<String>,
    ) -> Self {
        Self {
            cliente: cliente.into(),
            tema: tema.into(),
            publico: publico.into(),
            image_url: None,
            briefing: None,
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_briefing(mut self, briefing: ContentBriefing) -> Self {
        self.briefing = Some(briefing);
        self
    }
}
