//! Parsing of model output into plan JSON.
//!
//! Models sometimes wrap the requested object in prose ("Sure! Here you go:
//! {...}"). Parsing first tries the whole reply, then retries from the first
//! opening brace to the end of the text.

use serde_json::Value;
use thiserror::Error;

/// Why the lenient pass could not produce JSON.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    #[error("No JSON object found in the output.")]
    NoJsonObject,

    #[error("JSON decoding error: {0}")]
    Decode(String),
}

/// Model output that could not be parsed, kept for caller-side diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unable to parse output as JSON: {reason}")]
pub struct PlanParseError {
    pub raw_output: String,
    pub reason: ParseFailure,
}

/// Parse the text as a single JSON document.
pub fn parse_strict(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(text)
}

/// Parse from the first `{` to the end of the text.
pub fn parse_lenient(text: &str) -> Result<Value, ParseFailure> {
    let start = text.find('{').ok_or(ParseFailure::NoJsonObject)?;

    serde_json::from_str(&text[start..]).map_err(|e| ParseFailure::Decode(e.to_string()))
}

/// Strict parse of the trimmed reply, falling back to [`parse_lenient`].
pub fn parse_plan(output: &str) -> Result<Value, PlanParseError> {
    let text = output.trim();

    match parse_strict(text) {
        Ok(value) => Ok(value),
        Err(strict_err) => {
            tracing::debug!(error = %strict_err, "Strict parse failed, scanning for JSON object");
            parse_lenient(text).map_err(|reason| PlanParseError {
                raw_output: text.to_string(),
                reason,
            })
        }
    }
}
