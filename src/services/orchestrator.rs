//! Combined plan + budget generation
//!
//! Both requests are put in flight together and both are awaited. The result
//! is all-or-nothing: when either branch fails the caller only sees the error
//! that settled first, and whatever the sibling produced is dropped after being
//! logged.

use serde::Serialize;
use std::future::Future;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use super::budget::BudgetRequester;
use super::plan::PlanRequester;
use crate::error::Result;
use crate::log_debug;
use crate::types::{BudgetEstimate, TripPlan, TripRequest};

/// Itinerary and budget produced together
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullTrip {
    pub plan: TripPlan,
    pub budget: BudgetEstimate,
}

async fn timed<F: Future>(future: F) -> (F::Output, Duration) {
    let started = Instant::now();
    let output = future.await;
    (output, started.elapsed())
}

pub async fn generate_full_trip(
    planner: &PlanRequester,
    budgeter: &BudgetRequester,
    request: &TripRequest,
    cancellation: &CancellationToken,
) -> Result<FullTrip> {
    log_debug!("Generating full trip to {}", request.destination);

    let plan_branch = timed(planner.generate_plan(
        &request.destination,
        &request.interests,
        request.duration,
        cancellation,
    ));
    let budget_branch = timed(budgeter.estimate_budget(
        &request.destination,
        request.travelers,
        request.style,
        cancellation,
    ));

    let ((plan, plan_elapsed), (budget, budget_elapsed)) = tokio::join!(plan_branch, budget_branch);

    match (plan, budget) {
        (Ok(plan), Ok(budget)) => {
            log_debug!(
                "Full trip ready (plan {:?}, budget {:?})",
                plan_elapsed,
                budget_elapsed
            );
            Ok(FullTrip { plan, budget })
        }
        (Err(error), Ok(_)) => {
            tracing::warn!(
                elapsed_ms = millis(budget_elapsed),
                "discarding budget estimate because the plan request failed: {error}"
            );
            Err(error)
        }
        (Ok(_), Err(error)) => {
            tracing::warn!(
                elapsed_ms = millis(plan_elapsed),
                "discarding trip plan because the budget request failed: {error}"
            );
            Err(error)
        }
        (Err(plan_error), Err(budget_error)) => {
            if plan_elapsed <= budget_elapsed {
                tracing::warn!(
                    elapsed_ms = millis(budget_elapsed),
                    "discarding budget failure after plan failure: {budget_error}"
                );
                Err(plan_error)
            } else {
                tracing::warn!(
                    elapsed_ms = millis(plan_elapsed),
                    "discarding plan failure after budget failure: {plan_error}"
                );
                Err(budget_error)
            }
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
