use anyhow::Result;
use clap::{Parser, Subcommand};
use pantry_planner::cli::generate::GenerateArgs;

/// pantry-planner - Smart shopping lists from recipes and pantry stock
#[derive(Parser)]
#[command(name = "pantry-planner")]
#[command(about = "Consolidate recipe ingredients into a categorized shopping list", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a shopping list from recipes and pantry stock
    Generate(GenerateArgs),
    /// Convert a quantity between units
    Convert {
        quantity: f64,
        from: String,
        to: String,
    },
    /// Show the category, aisle and priority of ingredients
    Categorize {
        #[arg(required = true)]
        names: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = pantry_planner::Config::load_checked(cli.config.clone())?;

    // Initialize observability (tracing + logging)
    pantry_planner::observability::init_observability(
        "pantry-planner",
        env!("CARGO_PKG_VERSION"),
        &config.observability,
    )?;

    match cli.command {
        Commands::Generate(args) => pantry_planner::cli::generate::generate(&config, args).await,
        Commands::Convert { quantity, from, to } => {
            println!(
                "{}",
                pantry_planner::cli::convert::convert(quantity, &from, &to)
            );
            Ok(())
        }
        Commands::Categorize { names } => {
            for line in pantry_planner::cli::categorize::categorize(&names) {
                println!("{line}");
            }
            Ok(())
        }
    }
}
