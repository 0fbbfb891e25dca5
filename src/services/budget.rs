use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::parser::ResponseParser;
use super::prompts::{budget_contract, budget_prompt};
use crate::client::{ModelClient, ModelRequest};
use crate::error::Result;
use crate::log_debug;
use crate::types::{BudgetEstimate, BudgetStyle, Destination, Travelers};

/// Builds budget requests and checks the amounts that come back
#[derive(Clone)]
pub struct BudgetRequester {
    client: Arc<dyn ModelClient>,
    model: String,
    parser: ResponseParser,
}

impl BudgetRequester {
    pub fn new(client: Arc<dyn ModelClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            parser: ResponseParser::new(),
        }
    }

    /// Ask for an estimate. The breakdown is not required to sum to the total.
    pub async fn estimate_budget(
        &self,
        destination: &Destination,
        travelers: Travelers,
        style: BudgetStyle,
        cancellation: &CancellationToken,
    ) -> Result<BudgetEstimate> {
        log_debug!(
            "Estimating {} budget for {} traveler(s) to {}",
            style,
            travelers,
            destination
        );

        let request =
            ModelRequest::new(&self.model, budget_prompt(destination, travelers, style))?
                .with_output(budget_contract())
                .with_cancellation(cancellation.clone());

        let response = self.client.invoke(request).await?;
        let estimate: BudgetEstimate = self.parser.parse_json_response(response.text(), "budget")?;
        estimate.validate()?;

        if !estimate.breakdown_matches_total(0.05) {
            log_debug!(
                "Budget breakdown sums to {} against a total of {}",
                estimate.breakdown_sum(),
                estimate.total
            );
        }

        Ok(estimate)
    }
}
