use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tripplan_core::{AppError, Config, ConfigError};
use tripplan_itinerary::Planner;

#[derive(Parser)]
#[command(name = "tripplan", version, about = "Plan multi-day city visits around the weather")]
struct Cli {
    /// Config file to use instead of the one in the user config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Day-by-day itinerary with morning, afternoon and evening slots
    Plan {
        city: String,
        /// First day of the trip (YYYY-MM-DD)
        start: String,
        /// Last day of the trip (YYYY-MM-DD)
        end: String,
        /// POIs per day (defaults to planner.daily_limit)
        #[arg(long)]
        daily_limit: Option<usize>,
        /// Print the itinerary as JSON instead of markdown
        #[arg(long)]
        json: bool,
    },
    /// Points of interest near a city
    Pois {
        city: String,
        #[arg(long)]
        radius: Option<u32>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Daily forecast for a city
    Weather {
        city: String,
        /// Defaults to today
        #[arg(long)]
        start: Option<String>,
        /// Defaults to the start date
        #[arg(long)]
        end: Option<String>,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<Config, AppError> {
    let (config, _) = Config::load_validated(path.map(PathBuf::as_path)).map_err(|e| {
        e.downcast::<ConfigError>()
            .unwrap_or_else(|e| ConfigError::Invalid(format!("{:#}", e)))
    })?;
    Ok(config)
}

async fn run(cli: Cli) -> Result<String> {
    let config = load_config(cli.config.as_ref())?;
    let planner = Planner::from_config(&config).context("Failed to set up HTTP clients")?;

    let output = match cli.command {
        Command::Plan {
            city,
            start,
            end,
            daily_limit,
            json: false,
        } => planner.plan_itinerary(&city, &start, &end, daily_limit).await,
        Command::Plan {
            city,
            start,
            end,
            daily_limit,
            json: true,
        } => match planner.build_itinerary(&city, &start, &end, daily_limit).await {
            Ok(itinerary) => serde_json::to_string_pretty(&itinerary)?,
            Err(e) => e.report_line(),
        },
        Command::Pois {
            city,
            radius,
            limit,
        } => planner.poi_report(&city, radius, limit).await,
        Command::Weather { city, start, end } => {
            let today = chrono::Local::now().date_naive();
            planner
                .weather_report(&city, start.as_deref(), end.as_deref(), today)
                .await
        }
    };

    Ok(output)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = tripplan_core::init() {
        eprintln!("Failed to initialize logging: {:#}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(output) => {
            println!("{}", output);
            if output.starts_with("ERROR:") {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            let message = e
                .downcast_ref::<AppError>()
                .map(AppError::user_message)
                .unwrap_or("An unexpected error occurred. Please try again.");
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}
