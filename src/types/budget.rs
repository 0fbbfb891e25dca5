//! Budget estimate types, percentage helpers and formatting
//!
//! The breakdown is not guaranteed to add up to the total, so nothing here
//! asserts equality, and every percentage derived from the total is guarded
//! against a zero total.

use colored::Colorize;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Write};

use super::request::Travelers;
use crate::error::WayfarerError;
use crate::ui::rgb::{CORAL, DIM_WHITE, ELECTRIC_YELLOW, NEON_CYAN, SUCCESS_GREEN};

/// Categories the estimate is asked to fill in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BudgetCategory {
    Flights,
    Accommodation,
    Food,
    Activities,
    Transport,
}

impl BudgetCategory {
    pub const ALL: &'static [BudgetCategory] = &[
        Self::Flights,
        Self::Accommodation,
        Self::Food,
        Self::Activities,
        Self::Transport,
    ];

    /// Key used in the breakdown object
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Flights => "flights",
            Self::Accommodation => "accommodation",
            Self::Food => "food",
            Self::Activities => "activities",
            Self::Transport => "transport",
        }
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Estimated trip cost with a per-category breakdown
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BudgetEstimate {
    pub total: f64,
    pub currency: String,
    /// Amount per category; categories beyond the fixed set are kept as-is
    #[serde(default, deserialize_with = "present_amounts")]
    pub breakdown: BTreeMap<String, f64>,
}

/// Categories the provider left `null` are treated as absent
fn present_amounts<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let amounts = Option::<BTreeMap<String, Option<f64>>>::deserialize(deserializer)?;
    Ok(amounts
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(category, amount)| amount.map(|amount| (category, amount)))
        .collect())
}

/// One breakdown line with its share of the total, if a share can be computed
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub amount: f64,
    pub percent: Option<f64>,
}

impl BudgetEstimate {
    /// Reject negative or non-finite amounts
    pub fn validate(&self) -> Result<(), WayfarerError> {
        if !self.total.is_finite() || self.total < 0.0 {
            return Err(WayfarerError::malformed(
                "budget",
                format!("total must be a non-negative number, got {}", self.total),
            ));
        }

        if let Some((category, amount)) = self
            .breakdown
            .iter()
            .find(|(_, amount)| !amount.is_finite() || **amount < 0.0)
        {
            return Err(WayfarerError::malformed(
                "budget",
                format!("breakdown '{category}' must be a non-negative number, got {amount}"),
            ));
        }

        Ok(())
    }

    pub fn amount(&self, category: BudgetCategory) -> Option<f64> {
        self.breakdown.get(category.key()).copied()
    }

    /// Percentage of the total that `amount` represents; `None` when the total is zero
    pub fn share_of_total(&self, amount: f64) -> Option<f64> {
        (self.total.is_finite() && self.total > 0.0).then(|| amount / self.total * 100.0)
    }

    /// Breakdown lines, fixed categories first, then any extra categories by name
    pub fn category_shares(&self) -> Vec<CategoryShare> {
        let known = BudgetCategory::ALL
            .iter()
            .filter_map(|category| {
                self.breakdown
                    .get_key_value(category.key())
                    .map(|(key, amount)| (key, *amount))
            });
        let extra = self
            .breakdown
            .iter()
            .filter(|(key, _)| !BudgetCategory::ALL.iter().any(|c| c.key() == key.as_str()))
            .map(|(key, amount)| (key, *amount));

        known
            .chain(extra)
            .map(|(category, amount)| CategoryShare {
                category: category.clone(),
                amount,
                percent: self.share_of_total(amount),
            })
            .collect()
    }

    pub fn breakdown_sum(&self) -> f64 {
        self.breakdown.values().sum()
    }

    /// Whether the breakdown sum is within `tolerance` (a fraction of the total) of the total
    pub fn breakdown_matches_total(&self, tolerance: f64) -> bool {
        let difference = (self.breakdown_sum() - self.total).abs();
        if self.total > 0.0 {
            difference <= self.total * tolerance
        } else {
            difference == 0.0
        }
    }

    pub fn per_person(&self, travelers: Travelers) -> f64 {
        self.total / f64::from(travelers.get())
    }

    /// How far a desired budget falls below the estimate, if it does
    pub fn shortfall(&self, desired: f64) -> Option<f64> {
        (desired < self.total).then(|| self.total - desired)
    }
}

fn money(currency: &str, amount: f64) -> String {
    format!("{currency} {amount:.0}")
}

/// Render a budget estimate with a bar per category
pub fn format_budget(estimate: &BudgetEstimate, travelers: Travelers) -> String {
    const BAR_WIDTH: f64 = 24.0;
    let mut output = String::new();

    writeln!(
        output,
        "{} {}",
        "Estimated Total".bold(),
        money(&estimate.currency, estimate.total)
            .truecolor(SUCCESS_GREEN.0, SUCCESS_GREEN.1, SUCCESS_GREEN.2)
            .bold()
    )
    .expect("write to string should not fail");
    writeln!(
        output,
        "{}",
        format!(
            "Per person: ~{}",
            money(&estimate.currency, estimate.per_person(travelers).round())
        )
        .truecolor(DIM_WHITE.0, DIM_WHITE.1, DIM_WHITE.2)
    )
    .expect("write to string should not fail");
    writeln!(output).expect("write to string should not fail");

    for share in estimate.category_shares() {
        let bar = share.percent.map_or_else(String::new, |percent| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
            let filled = (percent.clamp(0.0, 100.0) / 100.0 * BAR_WIDTH).round() as usize;
            "█".repeat(filled)
        });
        let percent = share
            .percent
            .map_or_else(|| "  n/a".to_string(), |p| format!("{p:>4.0}%"));

        writeln!(
            output,
            "  {:<14} {:>12} {} {}",
            share.category.truecolor(NEON_CYAN.0, NEON_CYAN.1, NEON_CYAN.2),
            money(&estimate.currency, share.amount),
            percent.truecolor(DIM_WHITE.0, DIM_WHITE.1, DIM_WHITE.2),
            bar.truecolor(CORAL.0, CORAL.1, CORAL.2)
        )
        .expect("write to string should not fail");
    }

    if !estimate.breakdown_matches_total(0.05) {
        writeln!(
            output,
            "\n{}",
            format!(
                "Note: categories add up to {}, which differs from the total",
                money(&estimate.currency, estimate.breakdown_sum())
            )
            .truecolor(ELECTRIC_YELLOW.0, ELECTRIC_YELLOW.1, ELECTRIC_YELLOW.2)
        )
        .expect("write to string should not fail");
    }

    output
}
