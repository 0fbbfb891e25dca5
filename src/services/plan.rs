use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::parser::ResponseParser;
use super::prompts::{plan_contract, plan_prompt};
use crate::client::{ModelClient, ModelRequest};
use crate::error::Result;
use crate::types::{Destination, Interests, TripDuration, TripPlan};
use crate::{log_debug, log_warn};

/// Builds itinerary requests and validates what comes back
#[derive(Clone)]
pub struct PlanRequester {
    client: Arc<dyn ModelClient>,
    model: String,
    parser: ResponseParser,
}

impl PlanRequester {
    pub fn new(client: Arc<dyn ModelClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            parser: ResponseParser::new(),
        }
    }

    pub async fn generate_plan(
        &self,
        destination: &Destination,
        interests: &Interests,
        duration: TripDuration,
        cancellation: &CancellationToken,
    ) -> Result<TripPlan> {
        log_debug!("Generating {} plan for {}", duration, destination);

        let request = ModelRequest::new(&self.model, plan_prompt(destination, interests, duration))?
            .with_output(plan_contract())
            .with_cancellation(cancellation.clone());

        let response = self.client.invoke(request).await?;
        let plan: TripPlan = self.parser.parse_json_response(response.text(), "plan")?;
        plan.validate_itinerary()?;

        if plan.day_count() != duration.days() {
            log_warn!(
                "Plan for {} has {} days but {} was requested",
                destination,
                plan.day_count(),
                duration
            );
        }

        Ok(plan)
    }
}
