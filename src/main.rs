use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crag_finder::config::{CatalogConfig, FilterDefault};
use crag_finder::db;
use crag_finder::domain::models::{Coordinate, Discipline};
use crag_finder::repository::{ClimbRepository, ClimbStore, SettingsRepository};
use crag_finder::service::projection::{EmptyReason, Projection};
use crag_finder::service::{ClimbFinder, RemoteCatalog};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the local catalog database
    #[arg(long, env = "CRAG_DATA_DIR", default_value = ".crag")]
    data_dir: PathBuf,

    /// API credential for the remote catalog (falls back to the stored key)
    #[arg(long, env = "CRAG_API_KEY")]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch climbs around a coordinate, save them, print nearest-first
    Search {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Comma-separated disciplines to show (default: all)
        #[arg(long)]
        types: Option<String>,
        /// Search radius in miles
        #[arg(long, default_value_t = 120.0)]
        max_distance: f64,
    },
    /// Project the saved catalog around a coordinate without fetching
    List {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        #[arg(long)]
        types: Option<String>,
        #[arg(long, default_value_t = 120.0)]
        max_distance: f64,
    },
    /// Show the full record for one climb
    Show { id: i64 },
    /// Persist the catalog API credential
    SetKey { key: String },
}

/// Initialize logging with tracing_subscriber.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sqlx=warn".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .compact()
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let pool = db::init_db(&cli.data_dir).await?;
    let settings = SettingsRepository::new(pool.clone());

    match cli.command {
        Commands::SetKey { key } => {
            settings.set_api_key(&key).await?;
            println!("API key stored.");
        }
        Commands::Show { id } => {
            let store = ClimbRepository::new(pool);
            match store.get(id).await? {
                Some(climb) => print_detail(&climb),
                None => println!("No climb with id {id} in the local catalog."),
            }
        }
        Commands::Search {
            lat,
            lon,
            types,
            max_distance,
        } => {
            let api_key = resolve_api_key(cli.api_key, &settings).await?;
            let config = CatalogConfig::new(api_key).with_max_distance_miles(max_distance);
            let finder = build_finder(pool, config, types.as_deref(), max_distance).await?;

            let coordinate = Coordinate::new(lat, lon);
            let count = finder.search(coordinate).await?;
            println!("Fetched {count} climbs.");
            print_projection(&finder.current_projection(coordinate).await);
        }
        Commands::List {
            lat,
            lon,
            types,
            max_distance,
        } => {
            // Offline projection: any key satisfies the client we never use.
            let config = CatalogConfig::new("offline").with_max_distance_miles(max_distance);
            let finder = build_finder(pool, config, types.as_deref(), max_distance).await?;
            print_projection(&finder.current_projection(Coordinate::new(lat, lon)).await);
        }
    }

    Ok(())
}

async fn build_finder(
    pool: sqlx::SqlitePool,
    config: CatalogConfig,
    types: Option<&str>,
    max_distance: f64,
) -> Result<ClimbFinder> {
    let catalog = RemoteCatalog::new(config)?;
    let store: Arc<dyn ClimbStore> = Arc::new(ClimbRepository::new(pool));
    let finder = ClimbFinder::new(catalog, store, FilterDefault::All, max_distance).await?;
    if let Some(types) = types {
        finder.set_filters(parse_types(types)?).await;
    }
    Ok(finder)
}

async fn resolve_api_key(
    flag: Option<String>,
    settings: &SettingsRepository,
) -> Result<String> {
    if let Some(key) = flag {
        return Ok(key);
    }
    if let Some(key) = settings.get_api_key().await? {
        return Ok(key);
    }
    anyhow::bail!("no API key: pass --api-key, set CRAG_API_KEY, or run `crag set-key <key>`")
}

fn parse_types(types: &str) -> Result<HashSet<Discipline>> {
    let mut set = HashSet::new();
    for token in types.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match Discipline::parse(token) {
            Some(discipline) => {
                set.insert(discipline);
            }
            None => anyhow::bail!(
                "unknown discipline '{token}' (expected one of: {})",
                Discipline::ALL.map(|d| d.as_str()).join(", ")
            ),
        }
    }
    Ok(set)
}

fn print_projection(projection: &Projection) {
    match projection.empty_reason {
        Some(EmptyReason::NoFiltersSelected) => {
            println!("No disciplines selected - pass --types to choose some.")
        }
        Some(EmptyReason::NoMatches) => println!("No results."),
        None => {
            for item in &projection.items {
                let climb = &item.climb;
                println!(
                    "{:>7.1} mi  {}  [{} {}]  {:.1} stars  {}",
                    item.distance_miles,
                    climb.name,
                    climb.type_tag,
                    climb.rating,
                    climb.stars,
                    climb.location.join(" > "),
                );
            }
        }
    }
}

fn print_detail(climb: &crag_finder::domain::models::Climb) {
    println!("{} (#{})", climb.name, climb.id);
    println!(
        "  disciplines: {}",
        climb
            .type_list()
            .iter()
            .map(|d| d.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  rating: {}", climb.rating);
    println!("  stars: {:.1} ({} votes)", climb.stars, climb.star_votes);
    if let Some(pitches) = climb.num_pitches {
        println!("  pitches: {pitches}");
    }
    println!("  location: {}", climb.location.join(" > "));
    println!(
        "  coordinate: ({:.4}, {:.4})",
        climb.latitude, climb.longitude
    );
    if let Some(url) = &climb.url {
        println!("  url: {url}");
    }
}
