use crate::config::{Config, ModelOverrides};
use crate::error::WayfarerError;
use crate::log_debug;
use crate::planner::TripPlanner;
use crate::types::{
    BudgetEstimate, BudgetStyle, Coordinate, Destination, Interests, Travelers, TripDuration,
    TripRequest, format_budget, format_nearby, format_trip_plan,
};
use crate::ui::{self, rgb};
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;
use std::future::Future;
use std::time::Duration;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// Output switches shared by every generating command
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub json: bool,
    pub retries: usize,
}

/// Arguments of the `trip` command before validation
#[derive(Debug, Clone)]
pub struct TripArgs {
    pub destination: String,
    pub interests: Vec<String>,
    pub duration: TripDuration,
    pub travelers: u32,
    pub style: BudgetStyle,
}

impl TripArgs {
    fn into_request(self) -> Result<TripRequest, WayfarerError> {
        Ok(TripRequest::new(Destination::new(&self.destination)?)
            .with_interests(Interests::new(&self.interests))
            .with_duration(self.duration)
            .with_travelers(Travelers::new(self.travelers)?)
            .with_style(self.style))
    }
}

/// Build a planner from the user configuration, cancelled when Ctrl-C is pressed
fn build_planner() -> Result<TripPlanner> {
    let config = Config::load().context("Failed to load configuration")?;
    let planner = TripPlanner::from_config(&config)?;

    let token = planner.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log_debug!("Interrupt received, cancelling in-flight requests");
            token.cancel();
        }
    });

    Ok(planner)
}

/// Run `action`, retrying transient provider failures up to `retries` more times
async fn with_retries<T, F, Fut>(retries: usize, action: F) -> Result<T, WayfarerError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, WayfarerError>>,
{
    let strategy = ExponentialBackoff::from_millis(2)
        .factor(250)
        .max_delay(Duration::from_secs(8))
        .map(jitter)
        .take(retries);

    RetryIf::start(strategy, action, |error: &WayfarerError| {
        let retry = error.is_retryable();
        if retry {
            log_debug!("Retrying after transient failure: {}", error);
        }
        retry
    })
    .await
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn handle_plan(
    destination: &str,
    interests: &[String],
    duration: TripDuration,
    output: OutputOptions,
) -> Result<()> {
    let destination = Destination::new(destination)?;
    let interests = Interests::new(interests);
    let planner = build_planner()?;

    let spinner = ui::create_spinner(&format!("Planning {duration} in {destination}..."));
    let result = with_retries(output.retries, || {
        planner.generate_plan(&destination, &interests, duration)
    })
    .await;
    spinner.finish_and_clear();
    let plan = result?;

    if output.json {
        return print_json(&plan);
    }

    ui::print_bordered_content(&format_trip_plan(&plan));
    Ok(())
}

pub async fn handle_budget(
    destination: &str,
    travelers: u32,
    style: BudgetStyle,
    desired: Option<f64>,
    output: OutputOptions,
) -> Result<()> {
    let destination = Destination::new(destination)?;
    let travelers = Travelers::new(travelers)?;
    let planner = build_planner()?;

    let spinner = ui::create_spinner(&format!("Estimating a {style} budget for {destination}..."));
    let result = with_retries(output.retries, || {
        planner.estimate_budget(&destination, travelers, style)
    })
    .await;
    spinner.finish_and_clear();
    let estimate = result?;

    if output.json {
        return print_json(&estimate);
    }

    ui::print_bordered_content(&format_budget(&estimate, travelers));
    if let Some(desired) = desired {
        report_desired_budget(&estimate, desired);
    }
    Ok(())
}

fn report_desired_budget(estimate: &BudgetEstimate, desired: f64) {
    match estimate.shortfall(desired) {
        Some(gap) => ui::print_warning(&format!(
            "Your budget of {} {desired:.0} is about {} {gap:.0} short of the estimate.",
            estimate.currency, estimate.currency
        )),
        None => ui::print_success(&format!(
            "Your budget of {} {desired:.0} covers the estimate.",
            estimate.currency
        )),
    }
}

pub async fn handle_trip(args: TripArgs, output: OutputOptions) -> Result<()> {
    let request = args.into_request()?;
    let planner = build_planner()?;

    let spinner = ui::create_spinner(&format!(
        "Generating your trip to {} (itinerary and budget)...",
        request.destination
    ));
    let result = with_retries(output.retries, || planner.generate_full_trip(&request)).await;
    spinner.finish_and_clear();
    let trip = result?;

    if output.json {
        return print_json(&trip);
    }

    ui::print_bordered_content(&format_budget_summary(&trip.budget, request.travelers));
    ui::print_bordered_content(&format_trip_plan(&trip.plan));
    Ok(())
}

/// Compact budget block shown above the itinerary
fn format_budget_summary(estimate: &BudgetEstimate, travelers: Travelers) -> String {
    let mut output = String::new();
    let (green, cyan, dim) = (rgb::SUCCESS_GREEN, rgb::NEON_CYAN, rgb::DIM_WHITE);

    writeln!(
        output,
        "{} {} {}",
        "Budget".bold(),
        format!("{} {:.0}", estimate.currency, estimate.total)
            .truecolor(green.0, green.1, green.2)
            .bold(),
        format!(
            "(~{} {:.0} per person)",
            estimate.currency,
            estimate.per_person(travelers).round()
        )
        .truecolor(dim.0, dim.1, dim.2)
    )
    .expect("write to string should not fail");

    for share in estimate.category_shares().into_iter().take(4) {
        writeln!(
            output,
            "  {:<14} {} {:.0}",
            share.category.truecolor(cyan.0, cyan.1, cyan.2),
            estimate.currency,
            share.amount
        )
        .expect("write to string should not fail");
    }

    output
}

pub async fn handle_nearby(
    latitude: f64,
    longitude: f64,
    interests: &[String],
    output: OutputOptions,
) -> Result<()> {
    let coordinate = Coordinate::new(latitude, longitude)?;
    let interests = Interests::new(interests);
    let planner = build_planner()?;

    let spinner = ui::create_spinner("Looking for places nearby...");
    let result = with_retries(output.retries, || {
        planner.find_nearby(coordinate, &interests)
    })
    .await;
    spinner.finish_and_clear();
    let found = result?;

    if output.json {
        return print_json(&found);
    }

    ui::print_bordered_content(&format_nearby(&found));
    Ok(())
}

pub fn handle_config_command(
    api_key: Option<String>,
    endpoint: Option<String>,
    models: ModelOverrides,
    timeout_seconds: Option<u64>,
) -> Result<()> {
    log_debug!(
        "Starting 'config' command with endpoint: {:?}, models: {:?}, timeout: {:?}",
        endpoint,
        models,
        timeout_seconds
    );

    let changes_made = api_key.is_some()
        || endpoint.is_some()
        || models.plan.is_some()
        || models.budget.is_some()
        || models.nearby.is_some()
        || timeout_seconds.is_some();

    let config_path = Config::get_config_path()?;
    let mut config = Config::load_from(&config_path)?;

    if changes_made {
        config.update(api_key, endpoint, models, timeout_seconds)?;
        config.save_to(&config_path)?;
        ui::print_success("Configuration updated successfully.");
        println!();
    }

    // Show the effective credential, which may come from the environment
    config.apply_env_overrides();
    print_configuration(&config);

    Ok(())
}

fn mask_key(key: &str) -> String {
    let key = key.trim();
    if key.is_empty() {
        return "(not set)".to_string();
    }
    let visible: String = key.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
    if key.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("****{visible}")
    }
}

fn print_configuration(config: &Config) {
    let purple = rgb::ELECTRIC_PURPLE;
    let cyan = rgb::NEON_CYAN;
    let coral = rgb::CORAL;
    let yellow = rgb::ELECTRIC_YELLOW;
    let dim_sep = rgb::DIM_SEPARATOR;

    println!();
    println!(
        "{}  {}  {}",
        "━━━".truecolor(purple.0, purple.1, purple.2),
        ui::create_gradient_text("WAYFARER CONFIGURATION"),
        "━━━".truecolor(purple.0, purple.1, purple.2)
    );
    println!();

    print_section_header("PROVIDER");
    print_config_row("API Key", &mask_key(&config.api_key), yellow, false);
    print_config_row("Endpoint", &config.endpoint, cyan, true);
    print_config_row(
        "Timeout",
        &format!("{}s", config.timeout_seconds),
        coral,
        false,
    );

    println!();
    print_section_header("MODELS");
    print_config_row("Plan", &config.models.plan, cyan, true);
    print_config_row("Budget", &config.models.budget, cyan, true);
    print_config_row("Nearby", &config.models.nearby, cyan, true);

    println!();
    println!(
        "{}",
        "─".repeat(40).truecolor(dim_sep.0, dim_sep.1, dim_sep.2)
    );
    println!();
}

fn print_section_header(name: &str) {
    let purple = rgb::ELECTRIC_PURPLE;
    let dim_sep = rgb::DIM_SEPARATOR;
    println!(
        "{} {} {}",
        "─".truecolor(purple.0, purple.1, purple.2),
        name.truecolor(purple.0, purple.1, purple.2).bold(),
        "─"
            .repeat(30 - name.len().min(28))
            .truecolor(dim_sep.0, dim_sep.1, dim_sep.2)
    );
}

fn print_config_row(label: &str, value: &str, value_color: (u8, u8, u8), highlight: bool) {
    let dim = rgb::DIM_WHITE;
    let label_styled = format!("{label:>12}").truecolor(dim.0, dim.1, dim.2);

    let value_styled = if highlight {
        value
            .truecolor(value_color.0, value_color.1, value_color.2)
            .bold()
    } else {
        value.truecolor(value_color.0, value_color.1, value_color.2)
    };

    println!("{label_styled}  {value_styled}");
}
