//! Subcommand handlers

use super::{GeneratePostArgs, ImportHistoryArgs};
use anyhow::Context;
use leadflow::core::webhooks::{ContentBriefing, ContentRequest};
use leadflow::utils::format_duration;
use leadflow::{ImportError, ImportRequest, RecordId, Selection, Services};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

/// Rough time the workflow spends per lead when generating icebreakers
const ICEBREAKER_ESTIMATE: Duration = Duration::from_millis(3500);

pub async fn import_history(services: &Services, args: ImportHistoryArgs) -> anyhow::Result<()> {
    let selection = if args.leads.is_empty() {
        Selection::all(&args.campaign)
    } else {
        Selection::explicit(&args.campaign, args.leads.iter().map(|l| RecordId::parse(l)))
    };
    let request = ImportRequest::new(&args.client, selection);

    let runner = &services.runner;
    let plan = runner.plan(&request).await?;

    println!(
        "{} leads to import, estimated time {}",
        plan.total(),
        format_duration(plan.estimated_duration())
    );

    if !args.yes && !confirm("Start the import?").await? {
        // Dropping the plan releases the runner
        drop(plan);
        println!("Import cancelled");
        return Ok(());
    }

    let mut progress = runner.subscribe();
    let printer = tokio::spawn(async move {
        let (mut shown, mut failures) = (0, 0);
        while progress.changed().await.is_ok() {
            let job = progress.borrow_and_update().clone();
            if job.failures > failures {
                failures = job.failures;
                println!("  failed: {}", job.current_label);
            }
            if job.current > shown {
                shown = job.current;
                println!(
                    "[{}/{}] {:>3}% {}",
                    job.current,
                    job.total,
                    job.percent(),
                    job.current_label
                );
            }
            // This process runs a single job, so a job id means it has started
            if job.job_id.is_some() && !job.active {
                break;
            }
        }
    });

    let result = plan.execute().await;
    printer.await.context("progress printer panicked")?;

    println!(
        "Done in {}: {}",
        format_duration(result.elapsed),
        result
    );
    Ok(())
}

pub async fn sync_history(services: &Services, client: &str, lead: &str) -> anyhow::Result<()> {
    let account_id = account_for(services, client).await?;
    services
        .workflows
        .import_history(RecordId::parse(lead), &account_id)
        .await?;
    println!("History import started for lead {}", lead);
    Ok(())
}

pub async fn sync_recent(services: &Services, lead: &str) -> anyhow::Result<()> {
    services.workflows.sync_recent(RecordId::parse(lead)).await?;
    println!("Recent messages sync started for lead {}", lead);
    Ok(())
}

pub async fn icebreaker(services: &Services, client: &str, lead: &str) -> anyhow::Result<()> {
    services
        .workflows
        .generate_icebreaker(RecordId::parse(lead), client)
        .await?;
    println!("Icebreaker requested for lead {}", lead);
    Ok(())
}

pub async fn sync_connections(
    services: &Services,
    client: &str,
    campaign: Option<&str>,
) -> anyhow::Result<()> {
    let account_id = account_for(services, client).await?;
    services
        .workflows
        .sync_connections(&account_id, client, campaign)
        .await?;
    println!("Connection sync started for client {}", client);
    Ok(())
}

pub async fn bulk_icebreakers(
    services: &Services,
    client: &str,
    leads: &[String],
) -> anyhow::Result<()> {
    let lead_ids: Vec<RecordId> = leads.iter().map(|l| RecordId::parse(l)).collect();
    println!(
        "Generating {} icebreakers, estimated time {}",
        lead_ids.len(),
        format_duration(ICEBREAKER_ESTIMATE.saturating_mul(lead_ids.len() as u32))
    );
    services
        .workflows
        .generate_bulk_icebreakers(lead_ids, client)
        .await?;
    println!("{} icebreakers generated", leads.len());
    Ok(())
}

pub async fn import_post_leads(
    services: &Services,
    client: &str,
    campaign: &str,
    post_url: &str,
) -> anyhow::Result<()> {
    services
        .workflows
        .import_post_leads(post_url, campaign, client)
        .await?;
    println!("Post lead import started for campaign {}", campaign);
    Ok(())
}

pub async fn import_search(
    services: &Services,
    client: &str,
    list: &str,
    search_url: &str,
) -> anyhow::Result<()> {
    let account_id = account_for(services, client).await?;
    services
        .workflows
        .import_linkedin_search(search_url, list, client, &account_id)
        .await?;
    println!("Search import started for list {}", list);
    Ok(())
}

pub async fn generate_post(services: &Services, args: GeneratePostArgs) -> anyhow::Result<()> {
    let mut request = ContentRequest::new(args.client_name, args.theme, args.audience);
    if let Some(url) = args.image_url {
        request = request.with_image_url(url);
    }
    if let Some(client) = &args.client {
        match services.supabase.client_profile(client).await? {
            Some(profile) => request = request.with_briefing(ContentBriefing::from(profile)),
            None => warn!("Client {} not found, generating without briefing", client),
        }
    }

    let answer = services.workflows.generate_content(&request).await?;
    println!("{}", serde_json::to_string_pretty(&answer)?);
    Ok(())
}

async fn account_for(services: &Services, client: &str) -> anyhow::Result<String> {
    let account = match services.supabase.account_id(client).await {
        Ok(account) => account,
        Err(e) => {
            warn!("Account lookup for client {} failed: {}", client, e);
            None
        }
    };
    account.ok_or_else(|| {
        ImportError::PrerequisiteMissing {
            tenant: client.to_string(),
        }
        .into()
    })
}

async fn confirm(question: &str) -> anyhow::Result<bool> {
    println!("{} [y/N]", question);
    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("failed to read confirmation")?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}
