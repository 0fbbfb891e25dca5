use std::sync::Arc;

use serde_json::json;
use wayfarer::config::ModelConfig;
use wayfarer::types::{Destination, Interests, TripDuration};
use wayfarer::{ProviderError, TripPlanner, WayfarerError};

use test_utils::{PLAN, ScriptedClient, plan_json, text_reply};

fn kyoto() -> Destination {
    Destination::new("Kyoto").expect("valid destination")
}

fn planner_with(client: &Arc<ScriptedClient>) -> TripPlanner {
    TripPlanner::new(client.clone(), &ModelConfig::default())
}

#[tokio::test]
async fn test_generate_plan_returns_validated_plan() {
    let client = Arc::new(
        ScriptedClient::new().reply(PLAN, text_reply(&plan_json("Kyoto", "3 days", 3))),
    );
    let planner = planner_with(&client);

    let plan = planner
        .generate_plan(
            &kyoto(),
            &Interests::new(["Food", "History"]),
            TripDuration::ThreeDays,
        )
        .await
        .expect("plan should be generated");

    assert_eq!(plan.destination, "Kyoto");
    assert_eq!(plan.itinerary.len(), 3);
    let days: Vec<u32> = plan.itinerary.iter().map(|d| d.day).collect();
    assert_eq!(days, vec![1, 2, 3]);
    assert!(plan.itinerary.iter().all(|d| !d.schedule.is_empty()));

    let request = client.request_for(PLAN).expect("plan request recorded");
    assert_eq!(request.model, "gemini-3-flash-preview");
    assert_eq!(
        request.prompt,
        "Plan a trip to Kyoto for 3 days. Interests: Food, History. Return details including a daily itinerary."
    );
    assert!(request.grounding.is_none());
    let contract = request.output.expect("structured output requested");
    assert_eq!(contract.schema["required"], json!(["destination", "duration", "activities", "itinerary"]));
}

#[tokio::test]
async fn test_generate_plan_accepts_fenced_json() {
    let fenced = format!(
        "Here is your plan:\n```json\n{}\n```",
        plan_json("Kyoto", "2 days", 2)
    );
    let client = Arc::new(ScriptedClient::new().reply(
        PLAN,
        Ok(wayfarer::RawModelResponse::TextOnly { text: fenced }),
    ));

    let plan = planner_with(&client)
        .generate_plan(&kyoto(), &Interests::default(), TripDuration::TwoDays)
        .await
        .expect("fenced JSON should parse");
    assert_eq!(plan.day_count(), 2);
}

#[tokio::test]
async fn test_empty_interests_are_described_in_prompt() {
    let client = Arc::new(
        ScriptedClient::new().reply(PLAN, text_reply(&plan_json("Kyoto", "3 days", 3))),
    );
    planner_with(&client)
        .generate_plan(&kyoto(), &Interests::default(), TripDuration::ThreeDays)
        .await
        .expect("plan should be generated");

    let request = client.request_for(PLAN).expect("plan request recorded");
    assert!(request.prompt.contains("Interests: no particular preference."));
}

#[tokio::test]
async fn test_non_json_text_is_malformed() {
    let client = Arc::new(ScriptedClient::new().reply(
        PLAN,
        Ok(wayfarer::RawModelResponse::TextOnly {
            text: "I'm sorry, I can't help with that.".to_string(),
        }),
    ));

    let result = planner_with(&client)
        .generate_plan(&kyoto(), &Interests::default(), TripDuration::ThreeDays)
        .await;
    assert!(matches!(
        result,
        Err(WayfarerError::MalformedResponse { context: "plan", .. })
    ));
}

#[tokio::test]
async fn test_missing_fields_are_malformed() {
    let client = Arc::new(ScriptedClient::new().reply(
        PLAN,
        text_reply(&json!({ "destination": "Kyoto", "duration": "3 days" })),
    ));

    let result = planner_with(&client)
        .generate_plan(&kyoto(), &Interests::default(), TripDuration::ThreeDays)
        .await;
    assert!(matches!(result, Err(WayfarerError::MalformedResponse { .. })));
}

#[tokio::test]
async fn test_empty_itinerary_is_malformed() {
    let client = Arc::new(
        ScriptedClient::new().reply(PLAN, text_reply(&plan_json("Kyoto", "3 days", 0))),
    );

    let result = planner_with(&client)
        .generate_plan(&kyoto(), &Interests::default(), TripDuration::ThreeDays)
        .await;
    assert!(matches!(result, Err(WayfarerError::MalformedResponse { .. })));
}

#[tokio::test]
async fn test_out_of_order_days_are_malformed() {
    let body = json!({
        "destination": "Kyoto",
        "duration": "3 days",
        "activities": [],
        "itinerary": [
            { "day": 1, "schedule": ["Arrive"] },
            { "day": 3, "schedule": ["Leave"] }
        ]
    });
    let client = Arc::new(ScriptedClient::new().reply(PLAN, text_reply(&body)));

    let result = planner_with(&client)
        .generate_plan(&kyoto(), &Interests::default(), TripDuration::ThreeDays)
        .await;
    assert!(matches!(result, Err(WayfarerError::MalformedResponse { .. })));
}

#[tokio::test]
async fn test_day_count_differing_from_duration_is_kept() {
    let client = Arc::new(
        ScriptedClient::new().reply(PLAN, text_reply(&plan_json("Kyoto", "3 days", 2))),
    );

    let plan = planner_with(&client)
        .generate_plan(&kyoto(), &Interests::default(), TripDuration::ThreeDays)
        .await
        .expect("a shorter itinerary is still a valid plan");
    assert_eq!(plan.day_count(), 2);
}

#[tokio::test]
async fn test_provider_error_passes_through() {
    let client = Arc::new(ScriptedClient::new().reply(
        PLAN,
        Err(ProviderError::Unauthorized {
            status: 401,
            message: "API key not valid".to_string(),
        }
        .into()),
    ));

    let result = planner_with(&client)
        .generate_plan(&kyoto(), &Interests::default(), TripDuration::ThreeDays)
        .await;
    assert!(matches!(
        result,
        Err(WayfarerError::Provider(ProviderError::Unauthorized { status: 401, .. }))
    ));
    assert_eq!(client.call_count(), 1);
}

#[tokio::test]
async fn test_whole_number_floats_are_read_as_days() {
    let body = json!({
        "destination": "Kyoto",
        "duration": "3 days",
        "activities": ["Fushimi Inari"],
        "itinerary": [
            { "day": 1.0, "schedule": ["Arrive"] },
            { "day": 2.0, "schedule": ["Temples"] },
            { "day": 3.0, "schedule": ["Leave"] }
        ]
    });
    let client = Arc::new(ScriptedClient::new().reply(PLAN, text_reply(&body)));

    let plan = planner_with(&client)
        .generate_plan(&kyoto(), &Interests::new(["Food"]), TripDuration::ThreeDays)
        .await
        .expect("whole-number days should parse");

    assert_eq!(plan.day_count(), 3);
    let days: Vec<u32> = plan.itinerary.iter().map(|d| d.day).collect();
    assert_eq!(days, vec![1, 2, 3]);

    let request = client.request_for(PLAN).expect("plan request recorded");
    let contract = request.output.expect("structured output requested");
    assert_eq!(
        contract.schema["properties"]["itinerary"]["items"]["properties"]["day"],
        json!({ "type": "INTEGER" })
    );
}

#[tokio::test]
async fn test_fractional_day_is_malformed() {
    let body = json!({
        "destination": "Kyoto",
        "duration": "2 days",
        "activities": [],
        "itinerary": [
            { "day": 1, "schedule": ["Arrive"] },
            { "day": 1.5, "schedule": ["Leave"] }
        ]
    });
    let client = Arc::new(ScriptedClient::new().reply(PLAN, text_reply(&body)));

    let result = planner_with(&client)
        .generate_plan(&kyoto(), &Interests::default(), TripDuration::TwoDays)
        .await;
    assert!(matches!(
        result,
        Err(WayfarerError::MalformedResponse { context: "plan", .. })
    ));
}
