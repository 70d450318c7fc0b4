use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, ValueEnum};
use pantry_shared::{Recipe, StockEntry};
use pantry_shopping::{AdvisoryMerger, HttpAdvisoryProvider, ShoppingListService, render_note};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::AppError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain-text checklist
    #[default]
    Note,
    /// Full result as JSON
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// JSON file with an array of recipes
    #[arg(long)]
    pub recipes: PathBuf,

    /// JSON file with an array of pantry entries
    #[arg(long)]
    pub pantry: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Note)]
    pub format: OutputFormat,

    /// Write the list to a file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Skip the advisory provider even when it is configured
    #[arg(long)]
    pub no_advisory: bool,

    /// Advisory timeout (overrides config file)
    #[arg(long)]
    pub advisory_timeout_ms: Option<u64>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let content = std::fs::read_to_string(path).map_err(|source| AppError::IoError {
        path: path.to_owned(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| AppError::JsonError {
        path: path.to_owned(),
        source,
    })
}

/// Read and validate the recipe file
pub fn load_recipes(path: &Path) -> Result<Vec<Recipe>, AppError> {
    let recipes: Vec<Recipe> = read_json(path)?;
    for recipe in &recipes {
        recipe
            .check()
            .map_err(|e| AppError::invalid(format_args!("recipe '{}'", recipe.id), e))?;
    }

    Ok(recipes)
}

/// Read and validate the pantry file
pub fn load_pantry(path: &Path) -> Result<Vec<StockEntry>, AppError> {
    let stock: Vec<StockEntry> = read_json(path)?;
    for entry in &stock {
        entry
            .check()
            .map_err(|e| AppError::invalid(format_args!("pantry entry '{}'", entry.name), e))?;
    }

    Ok(stock)
}

fn advisory_merger(config: &Config, args: &GenerateArgs) -> anyhow::Result<AdvisoryMerger> {
    if args.no_advisory || !config.advisory.enabled {
        return Ok(AdvisoryMerger::disabled());
    }

    let timeout = args
        .advisory_timeout_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.advisory.timeout());

    let api_key = Some(config.advisory.api_key.to_owned());
    let provider = HttpAdvisoryProvider::new(
        config.advisory.endpoint.to_owned(),
        config.advisory.model.to_owned(),
        api_key,
        timeout,
    )?;

    tracing::info!(
        endpoint = %config.advisory.endpoint,
        model = %config.advisory.model,
        timeout_ms = timeout.as_millis() as u64,
        "Advisory provider enabled"
    );

    Ok(AdvisoryMerger::new(Arc::new(provider), timeout))
}

/// Generate the shopping list and render it in the requested format
#[tracing::instrument(skip(config))]
pub async fn run(config: &Config, args: &GenerateArgs) -> anyhow::Result<String> {
    if args.advisory_timeout_ms == Some(0) {
        return Err(AppError::ValidationError(
            "--advisory-timeout-ms must be greater than 0".to_string(),
        )
        .into());
    }

    let recipes = load_recipes(&args.recipes)?;
    let stock = match &args.pantry {
        Some(path) => load_pantry(path)?,
        None => Vec::new(),
    };

    tracing::info!(
        recipes = recipes.len(),
        pantry = stock.len(),
        "Generating shopping list"
    );

    let service = ShoppingListService::new(advisory_merger(config, args)?);
    let result = service.generate(&recipes, &stock).await;

    let rendered = match args.format {
        OutputFormat::Note => render_note(&result),
        OutputFormat::Json => serde_json::to_string_pretty(&result).map_err(AppError::from)?,
    };

    Ok(rendered)
}

/// Run and write the list to `--output` or stdout
pub async fn generate(config: &Config, args: GenerateArgs) -> anyhow::Result<()> {
    let rendered = run(config, &args).await?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered).map_err(|source| AppError::IoError {
                path: path.to_owned(),
                source,
            })?;
            tracing::info!(path = %path.display(), "Shopping list written");
        }
        None => print!("{rendered}"),
    }

    Ok(())
}
