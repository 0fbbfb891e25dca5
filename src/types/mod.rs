//! Domain types produced and consumed by the orchestration layer
//!
//! - Trip plans
//! - Budget estimates
//! - Nearby-place search results
//! - Validated request parameters

mod budget;
mod nearby;
mod request;
mod trip;

pub use budget::{BudgetCategory, BudgetEstimate, CategoryShare, format_budget};
pub use nearby::{MapReference, NearbySearchResult, UNTITLED_REFERENCE, format_nearby};
pub use request::{
    BudgetStyle, Coordinate, Destination, Interests, Travelers, TripDuration, TripRequest,
};
pub use trip::{DayPlan, TripPlan, format_trip_plan};
