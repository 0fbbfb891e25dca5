//! Nearby-place search results

use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::ui::rgb::{DIM_WHITE, ELECTRIC_PURPLE, NEON_CYAN};

/// Title shown for a map reference the provider left untitled
pub const UNTITLED_REFERENCE: &str = "View on Maps";

/// A map citation attached to a grounded answer
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MapReference {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl MapReference {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|title| !title.trim().is_empty())
            .unwrap_or(UNTITLED_REFERENCE)
    }
}

/// Free-text recommendations plus the map references backing them, in provider order
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct NearbySearchResult {
    pub text: String,
    pub sources: Vec<MapReference>,
}

pub fn format_nearby(result: &NearbySearchResult) -> String {
    let mut output = String::new();

    writeln!(
        output,
        "{}",
        "Suggestions"
            .truecolor(ELECTRIC_PURPLE.0, ELECTRIC_PURPLE.1, ELECTRIC_PURPLE.2)
            .bold()
    )
    .expect("write to string should not fail");

    if result.text.trim().is_empty() {
        writeln!(
            output,
            "{}",
            "No suggestions returned.".truecolor(DIM_WHITE.0, DIM_WHITE.1, DIM_WHITE.2)
        )
        .expect("write to string should not fail");
    } else {
        for paragraph in result.text.lines() {
            for line in textwrap::wrap(paragraph, 78) {
                writeln!(output, "{line}").expect("write to string should not fail");
            }
        }
    }

    if !result.sources.is_empty() {
        writeln!(output, "\n{}", "Map References".bold()).expect("write to string should not fail");
        for source in &result.sources {
            writeln!(
                output,
                "  {} {}\n    {}",
                "→".truecolor(NEON_CYAN.0, NEON_CYAN.1, NEON_CYAN.2),
                source.display_title().bold(),
                source.uri.truecolor(DIM_WHITE.0, DIM_WHITE.1, DIM_WHITE.2)
            )
            .expect("write to string should not fail");
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untitled_reference_falls_back() {
        let untitled = MapReference {
            uri: "https://maps.google.com/?cid=1".to_string(),
            title: None,
        };
        let blank = MapReference {
            title: Some("  ".to_string()),
            ..untitled.clone()
        };
        assert_eq!(untitled.display_title(), UNTITLED_REFERENCE);
        assert_eq!(blank.display_title(), UNTITLED_REFERENCE);
    }

    #[test]
    fn test_format_lists_references() {
        colored::control::set_override(false);
        let result = NearbySearchResult {
            text: "Try the park.".to_string(),
            sources: vec![MapReference {
                uri: "https://maps.google.com/?cid=7".to_string(),
                title: Some("Maruyama Park".to_string()),
            }],
        };
        let rendered = format_nearby(&result);
        assert!(rendered.contains("Try the park."));
        assert!(rendered.contains("Maruyama Park"));
        assert!(rendered.contains("https://maps.google.com/?cid=7"));
    }
}
