//! Prompt text and output contracts for each requester

use serde_json::json;

use crate::client::OutputContract;
use crate::types::{
    BudgetCategory, BudgetStyle, Coordinate, Destination, Interests, Travelers, TripDuration,
};

/// Rendering of an empty interest set
const NO_INTERESTS: &str = "no particular preference";

fn interest_list(interests: &Interests) -> String {
    if interests.is_empty() {
        NO_INTERESTS.to_string()
    } else {
        interests.joined()
    }
}

pub fn plan_prompt(destination: &Destination, interests: &Interests, duration: TripDuration) -> String {
    format!(
        "Plan a trip to {destination} for {duration}. Interests: {}. Return details including a daily itinerary.",
        interest_list(interests)
    )
}

pub fn budget_prompt(destination: &Destination, travelers: Travelers, style: BudgetStyle) -> String {
    let people = if travelers.get() == 1 { "person" } else { "people" };
    format!(
        "Estimate a travel budget for {travelers} {people} going to {destination} with a {style} budget style."
    )
}

pub fn nearby_prompt(coordinate: Coordinate, interests: &Interests) -> String {
    format!(
        "What are some interesting places to visit near my location (Lat: {}, Lng: {}) that match interests like {}? Provide descriptions and why they are recommended.",
        coordinate.latitude,
        coordinate.longitude,
        interest_list(interests)
    )
}

/// Shape of a [`crate::types::TripPlan`]
pub fn plan_contract() -> OutputContract {
    OutputContract::new(
        "trip_plan",
        json!({
            "type": "OBJECT",
            "properties": {
                "destination": { "type": "STRING" },
                "duration": { "type": "STRING" },
                "activities": { "type": "ARRAY", "items": { "type": "STRING" } },
                "itinerary": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "day": { "type": "INTEGER" },
                            "schedule": { "type": "ARRAY", "items": { "type": "STRING" } }
                        },
                        "required": ["day", "schedule"]
                    }
                }
            },
            "required": ["destination", "duration", "activities", "itinerary"]
        }),
    )
}

/// Shape of a [`crate::types::BudgetEstimate`]
pub fn budget_contract() -> OutputContract {
    let categories: serde_json::Map<String, serde_json::Value> = BudgetCategory::ALL
        .iter()
        .map(|category| (category.key().to_string(), json!({ "type": "NUMBER" })))
        .collect();

    OutputContract::new(
        "budget_estimate",
        json!({
            "type": "OBJECT",
            "properties": {
                "total": { "type": "NUMBER" },
                "currency": { "type": "STRING" },
                "breakdown": {
                    "type": "OBJECT",
                    "properties": categories
                }
            },
            "required": ["total", "currency", "breakdown"]
        }),
    )
}
