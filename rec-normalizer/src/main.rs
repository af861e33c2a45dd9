use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

use rec_core::storage::MemoryStore;
use rec_normalizer::observability::logging::init_logging;
use rec_normalizer::pipeline::steps::NormalizeStep;
use rec_normalizer::registry::ProviderRegistry;

#[derive(Parser)]
#[command(name = "rec-normalizer")]
#[command(about = "Activity data normalization and provider-mapping pipeline")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a batch of raw activity records for a provider
    Normalize {
        /// Provider ID (must exist in the registry)
        #[arg(long)]
        provider: String,
        /// Path to a JSON array of raw records
        #[arg(long)]
        input: PathBuf,
        /// Where to write the canonical records (JSON); stdout summary only if omitted
        #[arg(long)]
        output: Option<PathBuf>,
        /// Provider registry directory
        #[arg(long, default_value = "registry/providers")]
        registry: PathBuf,
    },
    /// List registered providers
    Providers {
        /// Provider registry directory
        #[arg(long, default_value = "registry/providers")]
        registry: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenv::dotenv().ok();
    init_logging();

    match cli.command {
        Commands::Normalize {
            provider,
            input,
            output,
            registry,
        } => {
            let registry = ProviderRegistry::load_from_directory(&registry)
                .context("Failed to load provider registry")?;
            let provider_config = registry
                .get_provider_config(&provider)
                .with_context(|| format!("Provider not found in registry: {}", provider))?
                .clone();
            if !provider_config.enabled {
                bail!("Provider is disabled: {}", provider);
            }

            let content = tokio::fs::read_to_string(&input)
                .await
                .with_context(|| format!("Failed to read input file {}", input.display()))?;
            let raw_records: Vec<serde_json::Value> = serde_json::from_str(&content)
                .context("Input file must contain a JSON array of raw records")?;

            let run_id = Uuid::new_v4();
            info!("Starting normalization run {} for '{}'", run_id, provider);

            let store = MemoryStore::new();
            let step = NormalizeStep::new();
            let result = step.run(&provider_config, &raw_records, &store).await?;

            if let Some(output_path) = output {
                let activities = store.activities();
                let json = serde_json::to_string_pretty(&activities)?;
                tokio::fs::write(&output_path, json)
                    .await
                    .with_context(|| {
                        format!("Failed to write output file {}", output_path.display())
                    })?;
                info!(
                    "Wrote {} canonical records to {}",
                    activities.len(),
                    output_path.display()
                );
            }

            println!("{}", result.message);
            if !result.success {
                println!(
                    "{} record(s) were skipped; see logs for details",
                    result.failed_count
                );
            }
        }
        Commands::Providers { registry } => {
            let registry = ProviderRegistry::load_from_directory(&registry)
                .context("Failed to load provider registry")?;
            for provider_id in registry.get_enabled_providers() {
                println!("{} (enabled)", provider_id);
            }
        }
    }

    Ok(())
}
