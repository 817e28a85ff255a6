mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flavor_bridge_core::{
    build_profile, create_provider, recommend, ProviderConfig, RecommendConfig,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "flavorbridge")]
#[command(about = "Find comfort-dish equivalents in another cuisine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend dishes from a target cuisine similar to a comfort dish
    Recommend {
        /// Title of the comfort dish
        #[arg(long)]
        dish: String,
        /// Target cuisine (region), e.g. "Korean"
        #[arg(long)]
        cuisine: String,
        /// Allergen or ingredient to avoid (repeatable)
        #[arg(long = "exclude")]
        exclude: Vec<String>,
        /// Recipe catalog JSON (overrides FLAVOR_BRIDGE_CATALOG)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the inferred profile for a dish
    Profile {
        /// Dish title
        #[arg(long)]
        title: String,
        /// Instruction step (repeatable); defaults to "cook"
        #[arg(long = "step")]
        steps: Vec<String>,
    },
}

/// Logs go to stderr so `--json` output stays machine-readable.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Recommend {
            dish,
            cuisine,
            exclude,
            catalog,
            json,
        } => {
            run_recommend(&dish, &cuisine, &exclude, catalog, json).await?;
        }
        Commands::Profile { title, steps } => {
            run_profile(&title, steps)?;
        }
    }

    Ok(())
}

async fn run_recommend(
    dish: &str,
    cuisine: &str,
    exclude: &[String],
    catalog: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let mut provider_config =
        ProviderConfig::from_env().context("Invalid recipe provider configuration")?;
    if catalog.is_some() {
        provider_config = provider_config.catalog_path(catalog);
    }
    let provider = create_provider(&provider_config).context("Failed to set up recipe provider")?;
    let config = RecommendConfig::from_env().context("Invalid recommendation configuration")?;

    let report = recommend(provider.as_ref(), dish, cuisine, exclude, &config).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", output::render_report(&report));
    }

    Ok(())
}

fn run_profile(title: &str, steps: Vec<String>) -> Result<()> {
    let steps = if steps.is_empty() {
        vec!["cook".to_string()]
    } else {
        steps
    };
    let profile = build_profile(title, &steps);
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}
