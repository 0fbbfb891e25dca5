//! Trip plan types and formatting

use colored::Colorize;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Write;

use crate::error::WayfarerError;
use crate::ui::rgb::{CORAL, DIM_WHITE, ELECTRIC_PURPLE, NEON_CYAN};

/// A generated trip: highlights plus a day-by-day itinerary
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TripPlan {
    pub destination: String,
    pub duration: String,
    pub activities: Vec<String>,
    pub itinerary: Vec<DayPlan>,
}

/// Schedule for a single day, `day` counting from 1
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DayPlan {
    #[serde(deserialize_with = "day_number")]
    pub day: u32,
    pub schedule: Vec<String>,
}

/// Accept `3` as well as `3.0`; anything else is not a day number
fn day_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.fract() != 0.0 || !(1.0..=f64::from(u32::MAX)).contains(&value) {
        return Err(serde::de::Error::custom(format!(
            "day must be a whole number of at least 1, got {value}"
        )));
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
    Ok(value as u32)
}

impl TripPlan {
    /// Check that the itinerary is non-empty and numbered `1..=n` in order
    pub fn validate_itinerary(&self) -> Result<(), WayfarerError> {
        if self.itinerary.is_empty() {
            return Err(WayfarerError::malformed("plan", "itinerary is empty"));
        }

        for (expected, day) in (1_u32..).zip(&self.itinerary) {
            if day.day != expected {
                return Err(WayfarerError::malformed(
                    "plan",
                    format!(
                        "itinerary day {} found where day {expected} was expected",
                        day.day
                    ),
                ));
            }
        }

        Ok(())
    }

    pub fn day_count(&self) -> usize {
        self.itinerary.len()
    }
}

/// Render a trip plan for the terminal
pub fn format_trip_plan(plan: &TripPlan) -> String {
    let mut output = String::new();

    writeln!(
        output,
        "{} {}",
        plan.destination
            .truecolor(ELECTRIC_PURPLE.0, ELECTRIC_PURPLE.1, ELECTRIC_PURPLE.2)
            .bold(),
        format!("({})", plan.duration).truecolor(DIM_WHITE.0, DIM_WHITE.1, DIM_WHITE.2)
    )
    .expect("write to string should not fail");

    if !plan.activities.is_empty() {
        writeln!(output, "\n{}", "Highlights".bold()).expect("write to string should not fail");
        for activity in &plan.activities {
            writeln!(output, "  {} {activity}", "•".truecolor(CORAL.0, CORAL.1, CORAL.2))
                .expect("write to string should not fail");
        }
    }

    writeln!(output, "\n{}", "Daily Itinerary".bold()).expect("write to string should not fail");
    for day in &plan.itinerary {
        writeln!(
            output,
            "\n  {}",
            format!("Day {}", day.day)
                .truecolor(NEON_CYAN.0, NEON_CYAN.1, NEON_CYAN.2)
                .bold()
        )
        .expect("write to string should not fail");
        for entry in &day.schedule {
            for (index, line) in textwrap::wrap(entry, 74).iter().enumerate() {
                let marker = if index == 0 { "–" } else { " " };
                writeln!(output, "    {marker} {line}").expect("write to string should not fail");
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_with_days(days: &[u32]) -> TripPlan {
        TripPlan {
            destination: "Kyoto".to_string(),
            duration: "3 days".to_string(),
            activities: vec!["Temples".to_string()],
            itinerary: days
                .iter()
                .map(|&day| DayPlan {
                    day,
                    schedule: vec![format!("Morning walk on day {day}")],
                })
                .collect(),
        }
    }

    #[test]
    fn test_consecutive_itinerary_is_valid() {
        assert!(plan_with_days(&[1, 2, 3]).validate_itinerary().is_ok());
    }

    #[test]
    fn test_itinerary_rejects_gaps_duplicates_and_order() {
        assert!(plan_with_days(&[]).validate_itinerary().is_err());
        assert!(plan_with_days(&[0, 1]).validate_itinerary().is_err());
        assert!(plan_with_days(&[1, 1, 2]).validate_itinerary().is_err());
        assert!(plan_with_days(&[1, 3]).validate_itinerary().is_err());
        assert!(plan_with_days(&[2, 1]).validate_itinerary().is_err());
    }

    #[test]
    fn test_day_accepts_whole_floats_only() {
        let day: DayPlan = serde_json::from_str(r#"{"day": 2.0, "schedule": []}"#)
            .expect("whole float is a day number");
        assert_eq!(day.day, 2);

        for bad in ["1.5", "0", "-1", "0.0", "\"1\""] {
            let body = format!(r#"{{"day": {bad}, "schedule": []}}"#);
            assert!(serde_json::from_str::<DayPlan>(&body).is_err(), "accepted day {bad}");
        }
    }

    #[test]
    fn test_format_lists_every_day() {
        colored::control::set_override(false);
        let rendered = format_trip_plan(&plan_with_days(&[1, 2]));
        assert!(rendered.contains("Kyoto (3 days)"));
        assert!(rendered.contains("Day 1"));
        assert!(rendered.contains("Day 2"));
        assert!(rendered.contains("Morning walk on day 2"));
    }
}
