// workorder-generation-service/src/main.rs

mod calc;
mod config;
mod crm;
mod document;
mod error;
mod export;
mod models;
mod numerals;
mod pipeline;
mod renderers;
mod template;
mod templates;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::crm::{CrmClient, DealSource};
use crate::export::DocumentExporter;
use crate::models::GenerationRequest;
use crate::pipeline::DocumentPipeline;

#[derive(Parser)]
#[command(name = "workorder-generation-service", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a work order from a generation-request JSON file and
    /// export the requested formats.
    Generate {
        /// Path to the GenerationRequest JSON.
        #[arg(long)]
        request: PathBuf,
        /// Output directory; defaults to the configured export dir.
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Print the structured preview artifact instead of exporting.
        #[arg(long)]
        preview: bool,
    },
    /// List deals from the configured CRM as mapped local records.
    Deals {
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },
    /// Fetch a single deal by its CRM id.
    Deal {
        #[arg(long)]
        id: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("FATAL: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.service.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!(
        service = %config.service.name,
        version = env!("CARGO_PKG_VERSION"),
        "Starting work-order generation service"
    );

    match cli.command {
        Command::Generate {
            request,
            out_dir,
            preview,
        } => generate(&config, &request, out_dir, preview).await,
        Command::Deals { limit } => list_deals(&config, limit).await,
        Command::Deal { id } => show_deal(&config, id).await,
    }
}

async fn generate(
    config: &Config,
    request_path: &PathBuf,
    out_dir: Option<PathBuf>,
    preview: bool,
) -> anyhow::Result<()> {
    let raw = tokio::fs::read_to_string(request_path)
        .await
        .with_context(|| format!("Failed to read request file {}", request_path.display()))?;
    let mut request: GenerationRequest =
        serde_json::from_str(&raw).context("Invalid generation request")?;
    request.output_formats = request.effective_formats(&config.export.default_formats);

    let pipeline = DocumentPipeline::new();

    if preview {
        let artifact = match pipeline.build_preview(&request, &[]) {
            Ok(artifact) => artifact,
            Err(e) => {
                error!("Preview failed: {}", e);
                println!("{}", serde_json::to_string_pretty(&e.to_error_response())?);
                std::process::exit(1);
            }
        };
        println!("{}", serde_json::to_string_pretty(&artifact)?);
        return Ok(());
    }

    let response = pipeline.process(request, &[]).await;

    if response.status != "success" {
        error!(error = ?response.error, "Generation failed");
        println!("{}", serde_json::to_string_pretty(&response)?);
        std::process::exit(1);
    }

    let exporter = DocumentExporter::new(
        out_dir.unwrap_or_else(|| PathBuf::from(&config.export.output_dir)),
    );
    let exported = exporter.export_all(&response.documents).await;

    info!(
        request_id = %response.request_id,
        exported = exported.len(),
        output_dir = %exporter.output_dir().display(),
        "Generation completed"
    );

    for file in &exported {
        println!("{}", file.path.display());
    }
    for token in &response.unresolved_placeholders {
        eprintln!("unresolved placeholder: {{{{{}}}}}", token);
    }

    Ok(())
}

async fn list_deals(config: &Config, limit: usize) -> anyhow::Result<()> {
    let client = crm_client(config)?;
    let deals = client.fetch_deals(limit).await?;

    info!(count = deals.len(), "Fetched deals");
    println!("{}", serde_json::to_string_pretty(&deals)?);

    Ok(())
}

async fn show_deal(config: &Config, id: i64) -> anyhow::Result<()> {
    let client = crm_client(config)?;
    let deal = client.fetch_deal(id).await?;

    info!(deal = %deal.number, "Fetched deal");
    println!("{}", serde_json::to_string_pretty(&deal)?);

    Ok(())
}

fn crm_client(config: &Config) -> anyhow::Result<CrmClient> {
    match CrmClient::new(config.crm.clone()) {
        Ok(client) => Ok(client),
        Err(e) => {
            error!("CRM client init failed: {}", e);
            println!(
                "{}",
                serde_json::to_string_pretty(&e.to_error_response())?
            );
            std::process::exit(1);
        }
    }
}
