mod locations;
mod search;

use clap::{Parser, Subcommand};
use sunuy_core::{AppConfig, DirectoryProvider, StaticDirectory};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sunuy-cli")]
#[command(about = "Suñuy Artisan directory command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search the artisan directory
    Search {
        /// Free-text search over name, trade, location and specialties
        #[arg(long)]
        search: Option<String>,
        /// Exact trade label (e.g. "Menuisier Bois")
        #[arg(long)]
        metier: Option<String>,
        /// Exact region name
        #[arg(long)]
        region: Option<String>,
        /// Exact department name
        #[arg(long)]
        department: Option<String>,
        /// Number of pages to reveal
        #[arg(long, default_value = "1")]
        pages: u32,
    },
    /// Browse regions, departments and communes
    Locations {
        region: Option<String>,
        department: Option<String>,
    },
    /// Load and validate the catalog and location data files
    Validate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = sunuy_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Search {
            search,
            metier,
            region,
            department,
            pages,
        }) => {
            let criteria = sunuy_core::FilterCriteria::new(
                search.unwrap_or_default(),
                metier.unwrap_or_default(),
                region.unwrap_or_default(),
                department.unwrap_or_default(),
            );
            let directory = load_directory(&config)?;
            search::run_search(directory, &config, criteria, pages).await?;
        }
        Some(Commands::Locations { region, department }) => {
            let directory = load_directory(&config)?;
            locations::run_locations(
                directory.locations(),
                region.as_deref(),
                department.as_deref(),
            )?;
        }
        Some(Commands::Validate) => run_validate(&config)?,
        None => println!("sunuy-cli ready; see --help for commands"),
    }

    Ok(())
}

fn load_directory(config: &AppConfig) -> anyhow::Result<StaticDirectory> {
    Ok(StaticDirectory::load(
        &config.catalog_path,
        &config.locations_path,
    )?)
}

fn run_validate(config: &AppConfig) -> anyhow::Result<()> {
    let directory = load_directory(config)?;
    let communes: usize = directory
        .locations()
        .regions()
        .iter()
        .flat_map(|r| &r.departments)
        .map(|d| d.communes.len())
        .sum();
    println!(
        "ok: {} artisans in {}",
        directory.artisans().len(),
        config.catalog_path.display()
    );
    println!(
        "ok: {} regions, {} communes in {}",
        directory.locations().regions().len(),
        communes,
        config.locations_path.display()
    );
    Ok(())
}
