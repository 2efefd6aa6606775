//! Command-line interface

mod commands;

use clap::{Args, Parser, Subcommand};
use leadflow::Config;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "leadflow", version, about = "Campaign lead sync and workflow triggers")]
pub struct Cli {
    /// Configuration file; environment variables are used when it does not exist
    #[arg(
        long,
        global = true,
        env = "LEADFLOW_CONFIG",
        default_value = "config/leadflow.yaml"
    )]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import LinkedIn history for the leads of a campaign, one at a time
    ImportHistory(ImportHistoryArgs),
    /// Deep history import for a single lead
    SyncHistory {
        #[arg(long)]
        client: String,
        #[arg(long)]
        lead: String,
    },
    /// Quick check for new messages of a single lead
    SyncRecent {
        #[arg(long)]
        lead: String,
    },
    /// Generate a personalized icebreaker for a lead
    Icebreaker {
        #[arg(long)]
        client: String,
        #[arg(long)]
        lead: String,
    },
    /// Pull the LinkedIn connections of a client account
    SyncConnections {
        #[arg(long)]
        client: String,
        /// Campaign the sync is started from
        #[arg(long)]
        campaign: Option<String>,
    },
    /// Generate icebreakers for several leads in one request
    BulkIcebreakers {
        #[arg(long)]
        client: String,
        #[arg(long = "lead", required = true)]
        leads: Vec<String>,
    },
    /// Add the people engaging with a LinkedIn post to a campaign
    ImportPostLeads {
        #[arg(long)]
        client: String,
        #[arg(long)]
        campaign: String,
        #[arg(long)]
        post_url: String,
    },
    /// Fill a contact list from a LinkedIn search
    ImportSearch {
        #[arg(long)]
        client: String,
        #[arg(long)]
        list: String,
        #[arg(long)]
        search_url: String,
    },
    /// Draft a post with the content workflow
    GeneratePost(GeneratePostArgs),
}

#[derive(Debug, Args)]
pub struct ImportHistoryArgs {
    /// Client whose connected account performs the import
    #[arg(long)]
    pub client: String,
    #[arg(long)]
    pub campaign: String,
    /// Campaign lead id to include; repeat for several, omit for the whole campaign
    #[arg(long = "lead")]
    pub leads: Vec<String>,
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct GeneratePostArgs {
    #[arg(long)]
    pub client_name: String,
    #[arg(long)]
    pub theme: String,
    #[arg(long)]
    pub audience: String,
    /// Load the briefing of this client into the request
    #[arg(long)]
    pub client: Option<String>,
    #[arg(long)]
    pub image_url: Option<String>,
}

async fn load_config(path: &Path) -> anyhow::Result<Config> {
    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        Ok(Config::from_file(path).await?)
    } else {
        debug!("{:?} not found, reading configuration from the environment", path);
        Ok(Config::from_env()?)
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli.config).await?;
    leadflow::utils::logging::init(&config.logging)?;

    let services = leadflow::Services::from_config(&config)?;

    match cli.command {
        Command::ImportHistory(args) => commands::import_history(&services, args).await,
        Command::SyncHistory { client, lead } => {
            commands::sync_history(&services, &client, &lead).await
        }
        Command::SyncRecent { lead } => commands::sync_recent(&services, &lead).await,
        Command::Icebreaker { client, lead } => {
            commands::icebreaker(&services, &client, &lead).await
        }
        Command::SyncConnections { client, campaign } => {
            commands::sync_connections(&services, &client, campaign.as_deref()).await
        }
        Command::BulkIcebreakers { client, leads } => {
            commands::bulk_icebreakers(&services, &client, &leads).await
        }
        Command::ImportPostLeads {
            client,
            campaign,
            post_url,
        } => commands::import_post_leads(&services, &client, &campaign, &post_url).await,
        Command::ImportSearch {
            client,
            list,
            search_url,
        } => commands::import_search(&services, &client, &list, &search_url).await,
        Command::GeneratePost(args) => commands::generate_post(&services, args).await,
    }
}
