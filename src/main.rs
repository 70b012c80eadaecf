use std::path::PathBuf;
use std::process::ExitCode;

use aid_match::commands::{self, AppState, CommandError};
use aid_match::config::{LoggingSettings, Settings};
use aid_match::models::{Coordinates, RecommendRequest};
use aid_match::services::Dataset;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "aid-match")]
#[command(about = "Rank offer/need pairings from an exported posting dataset")]
#[command(version)]
struct Cli {
    /// JSON file with `offers` and `needs` arrays
    #[arg(long, short = 'd', env = "AID_MATCH_DATA")]
    data: PathBuf,

    /// Settings file (defaults to config/default.toml + config/local.toml)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one offer against one need
    Score {
        #[arg(long)]
        offer: String,
        #[arg(long)]
        need: String,
    },

    /// Best offers for a need
    ForNeed {
        need: String,
        #[command(flatten)]
        limits: Limits,
    },

    /// Best needs an offer could serve
    ForOffer {
        offer: String,
        #[command(flatten)]
        limits: Limits,
    },

    /// Pair every open need with available offers, most urgent first
    Auto {
        #[arg(long)]
        max_distance_km: Option<f64>,
        #[arg(long)]
        min_score: Option<u32>,
        #[arg(long)]
        max_matches_per_need: Option<usize>,
    },

    /// Summarise supply, demand and top pairings for a resource keyword
    Recommend {
        resource_type: String,
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },
}

#[derive(clap::Args)]
struct Limits {
    #[arg(long)]
    max_distance_km: Option<f64>,
    #[arg(long)]
    min_score: Option<u32>,
    #[arg(long)]
    max_results: Option<usize>,
}

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&settings.logging);

    let dataset = match Dataset::load(&cli.data) {
        Ok(dataset) => dataset,
        Err(e) => {
            error!("Failed to load dataset: {}", e);
            return fail(CommandError::from(e));
        }
    };

    let state = AppState::new(dataset, settings);
    info!("Matcher ready (parallel: {})", state.matcher.is_parallel());

    match run(&state, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            fail(e)
        }
    }
}

fn run(state: &AppState, command: Commands) -> Result<(), CommandError> {
    match command {
        Commands::Score { offer, need } => print_json(&commands::score(state, &offer, &need)?),
        Commands::ForNeed { need, limits } => {
            let options = merge_limits(state, &limits);
            print_json(&commands::matches_for_need(state, &need, &options)?)
        }
        Commands::ForOffer { offer, limits } => {
            let options = merge_limits(state, &limits);
            print_json(&commands::matches_for_offer(state, &offer, &options)?)
        }
        Commands::Auto { max_distance_km, min_score, max_matches_per_need } => {
            let mut options = state.settings.batch.options();
            if let Some(km) = max_distance_km {
                options.max_distance_km = km;
            }
            if let Some(score) = min_score {
                options.min_score = score;
            }
            if let Some(cap) = max_matches_per_need {
                options.max_matches_per_need = cap;
            }
            print_json(&commands::auto_match(state, &options))
        }
        Commands::Recommend { resource_type, lat, lon } => {
            let location = lat.zip(lon).map(|(lat, lon)| Coordinates::new(lat, lon));
            let request = RecommendRequest { resource_type, location };
            print_json(&commands::recommend(state, &request)?)
        }
    }
}

fn merge_limits(state: &AppState, limits: &Limits) -> aid_match::MatchOptions {
    let mut options = state.settings.matching.options();
    if let Some(km) = limits.max_distance_km {
        options.max_distance_km = km;
    }
    if let Some(score) = limits.min_score {
        options.min_score = score;
    }
    if let Some(max) = limits.max_results {
        options.max_results = max;
    }
    options
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CommandError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn fail(e: CommandError) -> ExitCode {
    match serde_json::to_string_pretty(&e.to_response()) {
        Ok(body) => println!("{}", body),
        Err(ser) => error!("Failed to render error response: {}", ser),
    }
    ExitCode::FAILURE
}
