//! Validated request parameters
//!
//! Parameters are checked here, before any provider call, so that requesters
//! only ever see well-formed input.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::error::WayfarerError;

/// Trip length, restricted to the durations the planner offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TripDuration {
    #[serde(rename = "2 days")]
    TwoDays,
    #[default]
    #[serde(rename = "3 days")]
    ThreeDays,
    #[serde(rename = "5 days")]
    FiveDays,
    #[serde(rename = "1 week")]
    OneWeek,
    #[serde(rename = "2 weeks")]
    TwoWeeks,
}

impl TripDuration {
    pub const ALL: &'static [TripDuration] = &[
        Self::TwoDays,
        Self::ThreeDays,
        Self::FiveDays,
        Self::OneWeek,
        Self::TwoWeeks,
    ];

    /// Label used in prompts and on the command line
    pub const fn label(&self) -> &'static str {
        match self {
            Self::TwoDays => "2 days",
            Self::ThreeDays => "3 days",
            Self::FiveDays => "5 days",
            Self::OneWeek => "1 week",
            Self::TwoWeeks => "2 weeks",
        }
    }

    /// Number of itinerary days this duration implies
    pub const fn days(&self) -> usize {
        match self {
            Self::TwoDays => 2,
            Self::ThreeDays => 3,
            Self::FiveDays => 5,
            Self::OneWeek => 7,
            Self::TwoWeeks => 14,
        }
    }
}

impl FromStr for TripDuration {
    type Err = WayfarerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
        Self::ALL
            .iter()
            .find(|d| d.label() == normalized)
            .copied()
            .ok_or_else(|| {
                WayfarerError::invalid_input(format!(
                    "unsupported duration '{s}'. Supported: {}",
                    Self::ALL.iter().map(Self::label).collect::<Vec<_>>().join(", ")
                ))
            })
    }
}

impl fmt::Display for TripDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Coarse spend tier influencing the estimate magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BudgetStyle {
    Backpacker,
    #[default]
    Moderate,
    Luxury,
}

impl BudgetStyle {
    pub const ALL: &'static [BudgetStyle] = &[Self::Backpacker, Self::Moderate, Self::Luxury];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Backpacker => "Backpacker",
            Self::Moderate => "Moderate",
            Self::Luxury => "Luxury",
        }
    }
}

impl FromStr for BudgetStyle {
    type Err = WayfarerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .find(|style| style.name().eq_ignore_ascii_case(trimmed))
            .copied()
            .ok_or_else(|| {
                WayfarerError::invalid_input(format!(
                    "unknown budget style '{s}'. Supported: backpacker, moderate, luxury"
                ))
            })
    }
}

impl fmt::Display for BudgetStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Free-text destination, never blank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Destination(String);

impl Destination {
    pub fn new(value: impl AsRef<str>) -> Result<Self, WayfarerError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(WayfarerError::invalid_input("destination must not be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Destination {
    type Error = WayfarerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Destination> for String {
    fn from(value: Destination) -> Self {
        value.0
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Set of interests, trimmed and de-duplicated in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interests(Vec<String>);

impl Interests {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut interests: Vec<String> = Vec::new();
        for value in values {
            let trimmed = value.as_ref().trim();
            if trimmed.is_empty()
                || interests.iter().any(|seen| seen.eq_ignore_ascii_case(trimmed))
            {
                continue;
            }
            interests.push(trimmed.to_string());
        }
        Self(interests)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Comma-joined list as embedded in prompts
    pub fn joined(&self) -> String {
        self.0.join(", ")
    }
}

/// Number of people travelling, at least one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Travelers(NonZeroU32);

impl Travelers {
    pub fn new(count: u32) -> Result<Self, WayfarerError> {
        NonZeroU32::new(count)
            .map(Self)
            .ok_or_else(|| WayfarerError::invalid_input("travelers must be at least 1"))
    }

    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for Travelers {
    fn default() -> Self {
        Self(NonZeroU32::MIN)
    }
}

impl fmt::Display for Travelers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Latitude/longitude pair used to ground nearby searches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, WayfarerError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(WayfarerError::invalid_input(format!(
                "latitude {latitude} is outside [-90, 90]"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(WayfarerError::invalid_input(format!(
                "longitude {longitude} is outside [-180, 180]"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Inputs of the combined "generate full trip" flow
#[derive(Debug, Clone)]
pub struct TripRequest {
    pub destination: Destination,
    pub interests: Interests,
    pub duration: TripDuration,
    pub travelers: Travelers,
    pub style: BudgetStyle,
}

impl TripRequest {
    pub fn new(destination: Destination) -> Self {
        Self {
            destination,
            interests: Interests::default(),
            duration: TripDuration::default(),
            travelers: Travelers::default(),
            style: BudgetStyle::default(),
        }
    }

    #[must_use]
    pub fn with_interests(mut self, interests: Interests) -> Self {
        self.interests = interests;
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: TripDuration) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn with_travelers(mut self, travelers: Travelers) -> Self {
        self.travelers = travelers;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: BudgetStyle) -> Self {
        self.style = style;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_from_str() {
        assert_eq!("3 days".parse::<TripDuration>().ok(), Some(TripDuration::ThreeDays));
        assert_eq!("1  Week".parse::<TripDuration>().ok(), Some(TripDuration::OneWeek));
        assert!("4 days".parse::<TripDuration>().is_err());
        assert_eq!(TripDuration::TwoWeeks.days(), 14);
    }

    #[test]
    fn test_budget_style_from_str() {
        assert_eq!("luxury".parse::<BudgetStyle>().ok(), Some(BudgetStyle::Luxury));
        assert_eq!(" Backpacker ".parse::<BudgetStyle>().ok(), Some(BudgetStyle::Backpacker));
        assert!("premium".parse::<BudgetStyle>().is_err());
    }

    #[test]
    fn test_destination_rejects_blank() {
        assert!(Destination::new("   ").is_err());
        assert_eq!(
            Destination::new("  Kyoto ").map(|d| d.as_str().to_string()).ok(),
            Some("Kyoto".to_string())
        );
    }

    #[test]
    fn test_interests_deduplicate_in_order() {
        let interests = Interests::new(["Food", " history ", "", "food", "History", "Parks"]);
        assert_eq!(interests.joined(), "Food, history, Parks");
        assert_eq!(interests.len(), 3);
    }

    #[test]
    fn test_travelers_must_be_positive() {
        assert!(Travelers::new(0).is_err());
        assert_eq!(Travelers::default().get(), 1);
    }

    #[test]
    fn test_coordinate_bounds() {
        assert!(Coordinate::new(35.0, 135.0).is_ok());
        assert!(Coordinate::new(91.0, 0.0).is_err());
        assert!(Coordinate::new(0.0, -180.5).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }
}
