use std::sync::Arc;

use serde_json::json;
use wayfarer::config::ModelConfig;
use wayfarer::types::{BudgetCategory, BudgetStyle, Destination, Travelers};
use wayfarer::{TripPlanner, WayfarerError};

use test_utils::{BUDGET, ScriptedClient, budget_json, text_reply};

fn lisbon() -> Destination {
    Destination::new("Lisbon").expect("valid destination")
}

fn travelers(count: u32) -> Travelers {
    Travelers::new(count).expect("valid traveler count")
}

fn planner_with(client: &Arc<ScriptedClient>) -> TripPlanner {
    TripPlanner::new(client.clone(), &ModelConfig::default())
}

#[tokio::test]
async fn test_estimate_with_matching_breakdown() {
    let body = budget_json(
        4000.0,
        "EUR",
        &[
            ("flights", 1200.0),
            ("accommodation", 1500.0),
            ("food", 700.0),
            ("activities", 400.0),
            ("transport", 200.0),
        ],
    );
    let client = Arc::new(ScriptedClient::new().reply(BUDGET, text_reply(&body)));

    let estimate = planner_with(&client)
        .estimate_budget(&lisbon(), travelers(2), BudgetStyle::Moderate)
        .await
        .expect("estimate should be returned");

    assert!((estimate.total - 4000.0).abs() < f64::EPSILON);
    assert_eq!(estimate.currency, "EUR");
    assert_eq!(estimate.amount(BudgetCategory::Flights), Some(1200.0));
    assert!(estimate.breakdown_matches_total(0.0));
    assert!((estimate.per_person(travelers(2)) - 2000.0).abs() < f64::EPSILON);

    let request = client.request_for(BUDGET).expect("budget request recorded");
    assert_eq!(
        request.prompt,
        "Estimate a travel budget for 2 people going to Lisbon with a Moderate budget style."
    );
    assert_eq!(request.model, "gemini-3-flash-preview");
    let contract = request.output.expect("structured output requested");
    assert_eq!(
        contract.schema["properties"]["breakdown"]["properties"]["accommodation"],
        json!({ "type": "NUMBER" })
    );
}

#[tokio::test]
async fn test_single_traveler_prompt() {
    let body = budget_json(900.0, "USD", &[("food", 300.0)]);
    let client = Arc::new(ScriptedClient::new().reply(BUDGET, text_reply(&body)));

    planner_with(&client)
        .estimate_budget(&lisbon(), Travelers::default(), BudgetStyle::Backpacker)
        .await
        .expect("estimate should be returned");

    let request = client.request_for(BUDGET).expect("budget request recorded");
    assert!(request.prompt.contains("for 1 person going to Lisbon"));
    assert!(request.prompt.contains("Backpacker budget style"));
}

#[tokio::test]
async fn test_mismatched_breakdown_is_returned_unchanged() {
    let body = budget_json(5000.0, "USD", &[("flights", 1000.0), ("food", 500.0)]);
    let client = Arc::new(ScriptedClient::new().reply(BUDGET, text_reply(&body)));

    let estimate = planner_with(&client)
        .estimate_budget(&lisbon(), travelers(3), BudgetStyle::Luxury)
        .await
        .expect("a breakdown that does not add up is still an estimate");

    assert!((estimate.total - 5000.0).abs() < f64::EPSILON);
    assert!((estimate.breakdown_sum() - 1500.0).abs() < f64::EPSILON);
    assert!(!estimate.breakdown_matches_total(0.05));
    assert_eq!(estimate.breakdown.len(), 2);
}

#[tokio::test]
async fn test_zero_total_has_no_percentages() {
    let body = budget_json(0.0, "USD", &[("flights", 0.0), ("food", 0.0)]);
    let client = Arc::new(ScriptedClient::new().reply(BUDGET, text_reply(&body)));

    let estimate = planner_with(&client)
        .estimate_budget(&lisbon(), travelers(1), BudgetStyle::Moderate)
        .await
        .expect("zero is a valid total");

    let shares = estimate.category_shares();
    assert_eq!(shares.len(), 2);
    assert!(shares.iter().all(|share| share.percent.is_none()));
}

#[tokio::test]
async fn test_negative_total_is_malformed() {
    let body = budget_json(-10.0, "USD", &[]);
    let client = Arc::new(ScriptedClient::new().reply(BUDGET, text_reply(&body)));

    let result = planner_with(&client)
        .estimate_budget(&lisbon(), travelers(1), BudgetStyle::Moderate)
        .await;
    assert!(matches!(
        result,
        Err(WayfarerError::MalformedResponse { context: "budget", .. })
    ));
}

#[tokio::test]
async fn test_missing_currency_is_malformed() {
    let client = Arc::new(ScriptedClient::new().reply(
        BUDGET,
        text_reply(&json!({ "total": 1200, "breakdown": { "food": 300 } })),
    ));

    let result = planner_with(&client)
        .estimate_budget(&lisbon(), travelers(1), BudgetStyle::Moderate)
        .await;
    assert!(matches!(result, Err(WayfarerError::MalformedResponse { .. })));
}

#[tokio::test]
async fn test_extra_categories_are_kept_after_known_ones() {
    let body = budget_json(
        1000.0,
        "JPY",
        &[("visa", 100.0), ("food", 400.0), ("flights", 500.0)],
    );
    let client = Arc::new(ScriptedClient::new().reply(BUDGET, text_reply(&body)));

    let estimate = planner_with(&client)
        .estimate_budget(&lisbon(), travelers(1), BudgetStyle::Moderate)
        .await
        .expect("estimate should be returned");

    let order: Vec<String> = estimate
        .category_shares()
        .into_iter()
        .map(|share| share.category)
        .collect();
    assert_eq!(order, vec!["flights", "food", "visa"]);
}

#[tokio::test]
async fn test_null_category_is_left_out() {
    let body = json!({
        "total": 1000.0,
        "currency": "EUR",
        "breakdown": { "flights": null, "food": 100.0, "accommodation": 600.0 }
    });
    let client = Arc::new(ScriptedClient::new().reply(BUDGET, text_reply(&body)));

    let estimate = planner_with(&client)
        .estimate_budget(&lisbon(), travelers(1), BudgetStyle::Moderate)
        .await
        .expect("a null category does not invalidate the estimate");

    assert_eq!(estimate.amount(BudgetCategory::Flights), None);
    assert_eq!(estimate.amount(BudgetCategory::Food), Some(100.0));
    let order: Vec<String> = estimate
        .category_shares()
        .into_iter()
        .map(|share| share.category)
        .collect();
    assert_eq!(order, vec!["accommodation", "food"]);
}
