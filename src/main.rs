use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use weatherfinder_core::{AppError, Config};
use weatherfinder_forecast::{parse_current, parse_forecast, WeatherForecast};

const ABOUT: &str = "Summarize OpenWeatherMap forecasts per calendar day";

const LONG_ABOUT: &str = "
Reads an OpenWeatherMap 5-day/3-hour forecast response from a file and prints one summary
per calendar day as JSON: mean/min/max temperature, prevailing condition, wind and
visibility, plus the 24 hours of forecast steps that follow the day's first step.

Day boundaries use the zone from the configuration file unless --time-zone is given.
";

#[derive(Parser, Debug)]
#[command(version, about = ABOUT, long_about = LONG_ABOUT)]
struct Args {
    #[arg(help = "Path to a saved OpenWeatherMap JSON response")]
    file: PathBuf,

    #[arg(
        long,
        short = 't',
        help = "Zone for day boundaries: local, utc, an IANA name or +HH:MM"
    )]
    time_zone: Option<String>,

    #[arg(long, help = "Treat the file as a current-weather response")]
    current: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{:?}", e);
            eprintln!("{}\n  {}", e.user_message(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<String, AppError> {
    let (config, validation) = Config::load_validated(args.time_zone.as_deref())?;
    weatherfinder_core::init(&config.logging.filter)?;

    for warning in &validation.warnings {
        tracing::warn!("Config warning: {}", warning);
    }

    let body = std::fs::read_to_string(&args.file).map_err(|e| {
        tracing::error!("Failed to read {}: {}", args.file.display(), e);
        AppError::Io(e)
    })?;

    let output = if args.current {
        let current = parse_current(&body).and_then(|response| response.to_current_weather())?;
        serde_json::to_string_pretty(&current).context("Failed to serialize current weather")?
    } else {
        let zone = config.forecast.zone()?;

        tracing::debug!("Forecast units: {:?}", config.forecast.units);
        let response = parse_forecast(&body)?;
        let records = response.hourly_records()?;
        tracing::info!(
            "Summarizing {} forecast steps for {} in zone {}",
            records.len(),
            response.city.name,
            zone
        );

        let forecast = WeatherForecast {
            daily_forecasts: zone.aggregate(&records),
        };
        serde_json::to_string_pretty(&forecast).context("Failed to serialize forecast")?
    };

    Ok(output)
}
