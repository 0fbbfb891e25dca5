//! Wayfarer - AI-assisted trip planning
//!
//! This library generates day-by-day itineraries, budget estimates and
//! map-grounded nearby recommendations from a generative AI provider, and
//! runs plan and budget generation side by side for a complete trip.

#![allow(clippy::uninlined_format_args)] // Style preference
#![allow(clippy::return_self_not_must_use)] // Builder pattern is clear enough

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod planner;
pub mod services;
pub mod types;
pub mod ui;

pub use client::{ModelClient, ModelRequest, RawModelResponse};
pub use config::Config;
pub use error::{ProviderError, WayfarerError};
pub use planner::TripPlanner;
pub use services::FullTrip;

pub use types::{BudgetEstimate, MapReference, NearbySearchResult, TripPlan};
