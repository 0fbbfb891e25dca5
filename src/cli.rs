use crate::commands::{self, OutputOptions};
use crate::log_debug;
use crate::types::{BudgetStyle, TripDuration};
use crate::ui;
use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand, crate_version};

const LOG_FILE: &str = "wayfarer-debug.log";

/// CLI structure defining the available commands and global arguments
#[derive(Parser)]
#[command(
    author,
    version = crate_version!(),
    about = "Wayfarer: AI-assisted trip planning",
    long_about = "Wayfarer drafts day-by-day itineraries, estimates trip budgets and finds interesting places near you.",
    styles = get_styles(),
)]
pub struct Cli {
    /// Subcommands available for the CLI
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log debug messages to a file
    #[arg(short = 'l', long = "log", global = true, help = "Log debug messages to a file")]
    pub log: bool,

    /// Specify a custom log file path
    #[arg(long = "log-file", global = true, help = "Specify a custom log file path")]
    pub log_file: Option<String>,

    /// Suppress non-essential output (spinners, status messages)
    #[arg(short = 'q', long = "quiet", global = true, help = "Suppress non-essential output")]
    pub quiet: bool,

    /// Print results as JSON instead of formatted text
    #[arg(long = "json", global = true, help = "Print results as JSON")]
    pub json: bool,

    /// Retry provider failures that may be transient
    #[arg(
        long = "retries",
        global = true,
        default_value_t = 0,
        help = "Retry transient provider failures this many times with exponential backoff"
    )]
    pub retries: usize,
}

/// Enumeration of available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Draft a day-by-day itinerary
    #[command(about = "Draft a day-by-day itinerary for a destination")]
    Plan {
        #[arg(short, long, help = "Where you are going")]
        destination: String,

        #[arg(short, long = "interest", help = "An interest to plan around (repeatable)")]
        interests: Vec<String>,

        #[arg(long, default_value = "3 days", value_parser = parse_duration, help = "Trip length: 2 days, 3 days, 5 days, 1 week or 2 weeks")]
        duration: TripDuration,
    },

    /// Estimate what a trip will cost
    #[command(about = "Estimate a trip budget with a per-category breakdown")]
    Budget {
        #[arg(short, long, help = "Where you are going")]
        destination: String,

        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..), help = "Number of travelers")]
        travelers: u32,

        #[arg(long, default_value = "moderate", value_parser = parse_style, help = "Budget style: backpacker, moderate or luxury")]
        style: BudgetStyle,

        #[arg(long, help = "Your desired budget, compared against the estimate")]
        desired: Option<f64>,
    },

    /// Generate itinerary and budget together
    #[command(
        about = "Generate a full trip: itinerary and budget in one go",
        long_about = "Generate an itinerary and a budget estimate concurrently. If either request fails, nothing is shown but the error."
    )]
    Trip {
        #[arg(short, long, help = "Where you are going")]
        destination: String,

        #[arg(short, long = "interest", help = "An interest to plan around (repeatable)")]
        interests: Vec<String>,

        #[arg(long, default_value = "3 days", value_parser = parse_duration, help = "Trip length: 2 days, 3 days, 5 days, 1 week or 2 weeks")]
        duration: TripDuration,

        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..), help = "Number of travelers")]
        travelers: u32,

        #[arg(long, default_value = "moderate", value_parser = parse_style, help = "Budget style: backpacker, moderate or luxury")]
        style: BudgetStyle,
    },

    /// Find interesting places near a location
    #[command(about = "Find places worth visiting near a coordinate, with map references")]
    Nearby {
        #[arg(long, allow_negative_numbers = true, help = "Latitude in degrees")]
        lat: f64,

        #[arg(long, allow_negative_numbers = true, help = "Longitude in degrees")]
        lng: f64,

        #[arg(
            short,
            long = "interest",
            default_values_t = ["Food".to_string(), "Hidden Gems".to_string(), "Parks".to_string()],
            help = "An interest to search for (repeatable)"
        )]
        interests: Vec<String>,
    },

    /// Show or change the configuration
    #[command(about = "Show or update the Wayfarer configuration")]
    Config {
        #[arg(long, help = "Set the provider API key")]
        api_key: Option<String>,

        #[arg(long, help = "Set the provider base URL")]
        endpoint: Option<String>,

        #[arg(long, help = "Set the model used for itineraries")]
        plan_model: Option<String>,

        #[arg(long, help = "Set the model used for budget estimates")]
        budget_model: Option<String>,

        #[arg(long, help = "Set the model used for nearby search")]
        nearby_model: Option<String>,

        #[arg(long, help = "Set the provider timeout in seconds")]
        timeout: Option<u64>,
    },
}

fn parse_duration(value: &str) -> Result<TripDuration, String> {
    value.parse().map_err(|e: crate::WayfarerError| e.to_string())
}

fn parse_style(value: &str) -> Result<BudgetStyle, String> {
    value.parse().map_err(|e: crate::WayfarerError| e.to_string())
}

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Magenta.on_default().bold())
        .usage(AnsiColor::Cyan.on_default().bold())
        .literal(AnsiColor::Green.on_default().bold())
        .placeholder(AnsiColor::Yellow.on_default())
        .valid(AnsiColor::Blue.on_default().bold())
        .invalid(AnsiColor::Red.on_default().bold())
        .error(AnsiColor::Red.on_default().bold())
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Main function to parse arguments and handle the command
pub async fn main() -> anyhow::Result<()> {
    let cli = parse_args();

    if cli.log {
        crate::logger::enable_logging();
        let log_file = cli.log_file.as_deref().unwrap_or(LOG_FILE);
        crate::logger::set_log_file(log_file)?;
    } else {
        crate::logger::disable_logging();
    }

    // JSON output must stay machine-readable
    if cli.quiet || cli.json {
        ui::set_quiet_mode(true);
    }

    let output = OutputOptions {
        json: cli.json,
        retries: cli.retries,
    };

    if let Some(command) = cli.command {
        handle_command(command, output).await
    } else {
        let _ = Cli::parse_from(["wayfarer", "--help"]);
        Ok(())
    }
}

/// Dispatch a parsed subcommand to its handler
pub async fn handle_command(command: Commands, output: OutputOptions) -> anyhow::Result<()> {
    match command {
        Commands::Plan {
            destination,
            interests,
            duration,
        } => {
            log_debug!("Handling 'plan' for {} ({})", destination, duration);
            commands::handle_plan(&destination, &interests, duration, output).await
        }
        Commands::Budget {
            destination,
            travelers,
            style,
            desired,
        } => {
            log_debug!("Handling 'budget' for {} ({} travelers)", destination, travelers);
            commands::handle_budget(&destination, travelers, style, desired, output).await
        }
        Commands::Trip {
            destination,
            interests,
            duration,
            travelers,
            style,
        } => {
            log_debug!("Handling 'trip' for {}", destination);
            let request = commands::TripArgs {
                destination,
                interests,
                duration,
                travelers,
                style,
            };
            commands::handle_trip(request, output).await
        }
        Commands::Nearby {
            lat,
            lng,
            interests,
        } => {
            log_debug!("Handling 'nearby' at ({}, {})", lat, lng);
            commands::handle_nearby(lat, lng, &interests, output).await
        }
        Commands::Config {
            api_key,
            endpoint,
            plan_model,
            budget_model,
            nearby_model,
            timeout,
        } => commands::handle_config_command(
            api_key,
            endpoint,
            crate::config::ModelOverrides {
                plan: plan_model,
                budget: budget_model,
                nearby: nearby_model,
            },
            timeout,
        ),
    }
}
