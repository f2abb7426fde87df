//! JSON extraction from vision model completions
//!
//! Vision models often wrap the JSON payload in commentary before and
//! after. The extraction contract is a greedy outer-brace match: first
//! `{` through last `}`.

use crate::error::{Error, Result};

use super::raw::RawReceipt;

/// Extract and parse the receipt JSON object from a raw completion.
///
/// Returns `Error::InvalidData` when no `{...}` region exists or the
/// region is not valid JSON. Callers that must not fail use
/// [`super::analyze_response`], which substitutes the sentinel analysis.
pub fn extract_receipt_json(response: &str) -> Result<RawReceipt> {
    let response = response.trim();
    let start = response.find('{');
    let end = response.rfind('}');

    match (start, end) {
        (Some(s), Some(e)) if s < e => {
            let json_str = &response[s..=e];
            serde_json::from_str(json_str).map_err(|e| {
                Error::InvalidData(format!(
                    "Invalid receipt JSON from vision model: {} | Raw: {}",
                    e,
                    truncate(json_str)
                ))
            })
        }
        _ => Err(Error::InvalidData(format!(
            "No JSON found in vision model response | Raw: {}",
            truncate(response)
        ))),
    }
}

/// Truncate long completions for error messages
///
/// Completions are arbitrary text, so the cut must land on a char
/// boundary or the slice itself would panic.
fn truncate(text: &str) -> String {
    if text.len() > 200 {
        let mut end = 200;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &text[..end])
    } else {
        text.to_string()
    }
}
