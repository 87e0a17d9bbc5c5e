use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use services::{
    CatalogService, ChatCompletionsClient, DrillService, PromptBuilder, RetryPolicy,
    WordGenerator,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod drill;
mod render;

#[derive(Parser)]
#[command(name = "vocab-drill")]
#[command(about = "Drill Russian vocabulary by topic with model-generated explanations")]
struct Cli {
    /// Path to the vocabulary catalog document
    #[arg(long, env = "DRILL_CATALOG", default_value = "db.json", global = true)]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List sections and subsections
    Sections,
    /// Validate the catalog and report its size
    Check,
    /// Drill one subsection interactively
    Drill {
        /// Section key or display name
        section: String,
        /// Subsection key or display name
        subsection: String,
        /// Learner audience named in the prompt
        #[arg(long)]
        audience: Option<String>,
    },
}

/// Logs go to stderr so stdout stays readable for the drill.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "vocab_drill=info,services=info".into()),
    );
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing();

    let catalog = CatalogService::load_file(&cli.catalog).await?;

    match cli.command {
        Commands::Sections => {
            print!("{}", render::CatalogView(&catalog));
        }
        Commands::Check => {
            let subsections: usize = catalog
                .list_sections()
                .iter()
                .map(|s| s.subsections().len())
                .sum();
            println!(
                "{}: {} sections, {} subsections, {} words ({} empty subsections skipped)",
                cli.catalog.display(),
                catalog.list_sections().len(),
                subsections,
                catalog.word_count(),
                catalog.dropped_subsections().len()
            );
        }
        Commands::Drill {
            section,
            subsection,
            audience,
        } => {
            let client = ChatCompletionsClient::from_env();
            if client.enabled() {
                tracing::info!(
                    model = client.model().unwrap_or_default(),
                    "language model configured"
                );
            } else {
                tracing::warn!(
                    "language model not configured; set DRILL_AI_API_KEY or GEMINI_API_KEY"
                );
            }
            let prompt = audience.map(PromptBuilder::new).unwrap_or_default();
            tracing::debug!(audience = prompt.audience(), "prompt audience");
            let generator = WordGenerator::new(Arc::new(client))
                .with_retry(RetryPolicy::from_env())
                .with_prompt(prompt);
            let retry = generator.retry_policy();
            tracing::debug!(
                max_attempts = retry.attempts(),
                base_backoff_ms = u64::try_from(retry.base_backoff.as_millis()).unwrap_or(u64::MAX),
                "generation retry policy"
            );
            let service = DrillService::new(Arc::clone(&catalog), generator);
            drill::run(&service, &section, &subsection).await?;
        }
    }

    Ok(())
}
