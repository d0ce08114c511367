use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use okorok::catalog::{self, SelectedFilters, CATEGORY_GROUP_ID, DURATION_GROUP_ID};
use okorok::config::AppConfig;
use okorok::duration::{resolve_duration, DurationBucket};
use okorok::models::RecipeField;
use okorok::storage::{load_recipes, JsonlWriter};

#[derive(Parser)]
#[command(name = "okorok")]
#[command(about = "Okorok recipe catalog tools")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./okorok.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert duration text to minutes
    Parse {
        /// Duration strings, e.g. "1h30" or "1 hora e 30 minutos"
        #[arg(required = true)]
        values: Vec<String>,

        /// Show which rule resolved each value
        #[arg(long)]
        explain: bool,
    },

    /// Count recipes per preparation-time bucket
    Buckets {
        /// Recipe file (.json, .jsonl or saved API response)
        file: PathBuf,
    },

    /// Search and filter recipes
    Search {
        /// Recipe file (.json, .jsonl or saved API response)
        file: PathBuf,

        /// Free-text query
        #[arg(long, short, default_value = "")]
        query: String,

        /// Field to search (repeatable); defaults to the configured fields
        #[arg(long = "field")]
        fields: Vec<RecipeField>,

        /// Preparation-time bucket to keep (repeatable)
        #[arg(long = "bucket")]
        buckets: Vec<DurationBucket>,

        /// Category to keep (repeatable)
        #[arg(long = "category")]
        categories: Vec<String>,
    },

    /// Write recipes with their parsed preparation time as JSONL
    Annotate {
        /// Recipe file (.json, .jsonl or saved API response)
        file: PathBuf,

        /// Output JSONL path
        #[arg(long, short)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    init_tracing(
        cli.log_level.as_deref().unwrap_or(&config.log_level),
        cli.json_logs || config.json_logs,
    );

    tracing::debug!("Starting okorok v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Parse { values, explain } => {
            for value in values {
                match resolve_duration(&value) {
                    Some(resolution) if explain => {
                        println!("{} -> {} ({})", value, resolution.minutes, resolution.strategy)
                    }
                    Some(resolution) => println!("{} -> {}", value, resolution.minutes),
                    None => println!("{} -> -", value),
                }
            }
        }

        Commands::Buckets { file } => {
            let recipes = load_recipes(&file)?;
            let group = catalog::duration_filter_group(&recipes);

            println!("{} ({} recipes)", group.label, recipes.len());
            for item in group.items {
                println!("  {:<20} {:>5}", item.label, item.count.unwrap_or(0));
            }
        }

        Commands::Search {
            file,
            query,
            fields,
            buckets,
            categories,
        } => {
            let recipes = load_recipes(&file)?;
            let fields = if fields.is_empty() {
                config.catalog.search_fields.clone()
            } else {
                fields
            };

            let mut selected = SelectedFilters::new();
            selected.insert(
                DURATION_GROUP_ID.to_string(),
                buckets.iter().map(|b| b.id().to_string()).collect(),
            );
            selected.insert(
                CATEGORY_GROUP_ID.to_string(),
                categories
                    .iter()
                    .map(|c| c.trim().to_lowercase())
                    .collect::<HashSet<_>>(),
            );

            let found = catalog::filter_recipes(&recipes, &query, &fields);
            let found = catalog::apply_filters(found, &selected);

            for recipe in &found {
                let minutes = recipe
                    .prep_minutes()
                    .map(|m| format!("{} min", m))
                    .unwrap_or_else(|| "?".to_string());
                println!("{:>8}  {:<40} {}", recipe.id.as_str(), recipe.title, minutes);
            }
            println!(
                "{} recipe(s) found ({} filter(s) selected)",
                found.len(),
                catalog::total_selected(&selected)
            );
        }

        Commands::Annotate { file, output } => {
            let recipes = load_recipes(&file)?;
            let annotated: Vec<_> = recipes.iter().map(catalog::annotate).collect();

            let written = JsonlWriter::new(output.clone()).write_all(&annotated)?;
            println!("Wrote {} recipes to {}", written, output.display());
        }
    }

    Ok(())
}

/// Logs go to stderr so command output stays pipeable.
fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
