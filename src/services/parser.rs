//! Response Parser Service
//!
//! Turns the text a structured request returns into a typed value. Providers
//! usually honour the JSON mime type, but fenced or prefixed output is
//! tolerated before the response is declared malformed.

use serde::de::DeserializeOwned;

use crate::error::WayfarerError;

/// Parser for JSON payloads returned under an output contract
#[derive(Clone, Debug, Default)]
pub struct ResponseParser;

impl ResponseParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse `response` as `T`, trying the raw text, a fenced block, then the outermost object
    pub fn parse_json_response<T>(
        &self,
        response: &str,
        context: &'static str,
    ) -> Result<T, WayfarerError>
    where
        T: DeserializeOwned,
    {
        crate::log_debug!(
            "Parser: parsing {} response - {} chars",
            context,
            response.len()
        );

        if response.trim().is_empty() {
            return Err(WayfarerError::malformed(context, "response text is empty"));
        }

        let direct_error = match serde_json::from_str::<T>(response.trim()) {
            Ok(parsed) => return Ok(parsed),
            Err(e) => e,
        };
        crate::log_debug!("Parser: direct parsing failed: {}", direct_error);

        if let Some(fenced) = self.extract_from_markdown(response) {
            match serde_json::from_str::<T>(&fenced) {
                Ok(parsed) => {
                    crate::log_debug!("Parser: fenced JSON parsing successful");
                    return Ok(parsed);
                }
                Err(e) => crate::log_debug!("Parser: fenced JSON parsing failed: {}", e),
            }
        }

        if let Some(object) = self.extract_json_object(response) {
            match serde_json::from_str::<T>(object) {
                Ok(parsed) => {
                    crate::log_debug!("Parser: extracted object parsing successful");
                    return Ok(parsed);
                }
                Err(e) => crate::log_debug!("Parser: extracted object parsing failed: {}", e),
            }
        }

        Err(WayfarerError::malformed(
            context,
            format!(
                "{direct_error}. Raw response: {}",
                response.chars().take(300).collect::<String>()
            ),
        ))
    }

    /// Contents of the first ```json (or bare ```) fenced block
    pub fn extract_from_markdown(&self, response: &str) -> Option<String> {
        let (start, marker_len) = match response.find("```json") {
            Some(position) => (position, "```json".len()),
            None => (response.find("```")?, "```".len()),
        };
        let content_start = start + marker_len;
        let content_end = content_start + response[content_start..].find("```")?;
        Some(response[content_start..content_end].trim().to_string())
    }

    /// Slice from the first `{` to the last `}`
    fn extract_json_object<'a>(&self, response: &'a str) -> Option<&'a str> {
        let start = response.find('{')?;
        let end = response.rfind('}')?;
        (end > start).then(|| &response[start..=end])
    }
}
