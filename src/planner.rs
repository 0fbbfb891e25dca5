//! Entry point for callers: one model client, three requesters, one cancellation scope

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::client::{GeminiClient, ModelClient};
use crate::config::{Config, ModelConfig};
use crate::error::Result;
use crate::services::{
    BudgetRequester, FullTrip, NearbyRequester, PlanRequester, generate_full_trip,
};
use crate::types::{
    BudgetEstimate, BudgetStyle, Coordinate, Destination, Interests, NearbySearchResult,
    Travelers, TripDuration, TripPlan, TripRequest,
};

/// Trip planning facade over a shared [`ModelClient`]
///
/// Every request issued through a planner carries its cancellation token, so
/// cancelling the token aborts whatever is in flight.
#[derive(Clone)]
pub struct TripPlanner {
    plan: PlanRequester,
    budget: BudgetRequester,
    nearby: NearbyRequester,
    cancellation: CancellationToken,
}

impl TripPlanner {
    pub fn new(client: Arc<dyn ModelClient>, models: &ModelConfig) -> Self {
        Self {
            plan: PlanRequester::new(Arc::clone(&client), &models.plan),
            budget: BudgetRequester::new(Arc::clone(&client), &models.budget),
            nearby: NearbyRequester::new(client, &models.nearby),
            cancellation: CancellationToken::new(),
        }
    }

    /// Build a planner on the Gemini client; fails at once without a credential
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = GeminiClient::from_config(config)?;
        Ok(Self::new(Arc::new(client), &config.models))
    }

    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Abort every in-flight request issued through this planner
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    pub async fn generate_plan(
        &self,
        destination: &Destination,
        interests: &Interests,
        duration: TripDuration,
    ) -> Result<TripPlan> {
        self.plan
            .generate_plan(destination, interests, duration, &self.cancellation)
            .await
    }

    pub async fn estimate_budget(
        &self,
        destination: &Destination,
        travelers: Travelers,
        style: BudgetStyle,
    ) -> Result<BudgetEstimate> {
        self.budget
            .estimate_budget(destination, travelers, style, &self.cancellation)
            .await
    }

    pub async fn find_nearby(
        &self,
        coordinate: Coordinate,
        interests: &Interests,
    ) -> Result<NearbySearchResult> {
        self.nearby
            .find_nearby(coordinate, interests, &self.cancellation)
            .await
    }

    pub async fn generate_full_trip(&self, request: &TripRequest) -> Result<FullTrip> {
        generate_full_trip(&self.plan, &self.budget, request, &self.cancellation).await
    }
}
