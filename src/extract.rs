//! # Token Extraction
//!
//! Usage counters show up in several places depending on the record type and
//! the logger version that wrote it. Candidate source objects are examined in
//! order and the first one with any positive counter supplies all four values.

use serde_json::{Map, Value};

use crate::models::TokenCounts;

pub const INPUT_ALIASES: &[&str] = &["input_tokens", "inputTokens", "prompt_tokens"];
pub const OUTPUT_ALIASES: &[&str] = &["output_tokens", "outputTokens", "completion_tokens"];
pub const CACHE_CREATE_ALIASES: &[&str] = &[
    "cache_creation_input_tokens",
    "cacheCreationInputTokens",
    "cache_creation_tokens",
];
pub const CACHE_READ_ALIASES: &[&str] = &[
    "cache_read_input_tokens",
    "cacheReadInputTokens",
    "cache_read_tokens",
];

fn is_assistant(record: &Value) -> bool {
    record.get("type").and_then(|t| t.as_str()) == Some("assistant")
}

/// Ordered candidate objects that may hold usage counters for this record.
pub fn candidate_sources(record: &Value) -> Vec<&Map<String, Value>> {
    let nested = record.get("message").and_then(|m| m.get("usage"));
    let top = record.get("usage");
    let ordered = if is_assistant(record) {
        [nested, top, Some(record)]
    } else {
        [top, nested, Some(record)]
    };
    ordered
        .into_iter()
        .flatten()
        .filter_map(|v| v.as_object())
        .collect()
}

fn positive_count(v: &Value) -> Option<u64> {
    let n = if let Some(n) = v.as_u64() {
        n
    } else if let Some(f) = v.as_f64() {
        if f.is_finite() && f >= 1.0 { f as u64 } else { 0 }
    } else if let Some(s) = v.as_str() {
        s.trim().parse::<u64>().ok()?
    } else {
        return None;
    };
    (n > 0).then_some(n)
}

/// First alias holding a strictly positive value wins; otherwise zero.
pub fn first_positive(obj: &Map<String, Value>, aliases: &[&str]) -> u64 {
    aliases
        .iter()
        .find_map(|k| obj.get(*k).and_then(positive_count))
        .unwrap_or(0)
}

pub fn counts_from_source(obj: &Map<String, Value>) -> TokenCounts {
    TokenCounts {
        input: first_positive(obj, INPUT_ALIASES),
        output: first_positive(obj, OUTPUT_ALIASES),
        cache_create: first_positive(obj, CACHE_CREATE_ALIASES),
        cache_read: first_positive(obj, CACHE_READ_ALIASES),
    }
}

/// Extract token counts from the first authoritative source; all zero when none has usage.
pub fn extract_tokens(record: &Value) -> TokenCounts {
    candidate_sources(record)
        .into_iter()
        .map(counts_from_source)
        .find(|c| !c.is_zero())
        .unwrap_or_default()
}
