//! Corpus-wide duplicate suppression keyed on message id + request id.

use serde_json::Value;
use std::collections::HashSet;

const MESSAGE_ID_KEYS: &[&str] = &["message_id", "messageId"];
const NESTED_MESSAGE_ID_KEYS: &[&str] = &["id", "message_id"];
const REQUEST_ID_KEYS: &[&str] = &["requestId", "request_id"];
const NESTED_REQUEST_ID_KEYS: &[&str] = &["requestId", "request_id"];

fn first_str<'a>(v: Option<&'a Value>, keys: &[&str]) -> Option<&'a str> {
    let v = v?;
    keys.iter()
        .find_map(|k| v.get(*k).and_then(|s| s.as_str()).filter(|s| !s.is_empty()))
}

/// Identity key for a record, or `None` when either half is missing.
pub fn identity_key(record: &Value) -> Option<String> {
    let message = record.get("message");
    let mid = first_str(Some(record), MESSAGE_ID_KEYS)
        .or_else(|| first_str(message, NESTED_MESSAGE_ID_KEYS))?;
    let rid = first_str(Some(record), REQUEST_ID_KEYS)
        .or_else(|| first_str(message, NESTED_REQUEST_ID_KEYS))?;
    Some(format!("{mid}:{rid}"))
}

/// Keys seen during one aggregation run. Create a fresh one per run.
#[derive(Debug, Default)]
pub struct DedupSet {
    seen: HashSet<String>,
}

impl DedupSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// True the first time `key` is observed.
    pub fn observe(&mut self, key: String) -> bool {
        self.seen.insert(key)
    }

    /// Records without a derivable key are always treated as unique.
    pub fn is_first_occurrence(&mut self, record: &Value) -> bool {
        match identity_key(record) {
            Some(key) => self.observe(key),
            None => true,
        }
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn key_from_top_level_and_nested() {
        let v = json!({"message_id": "m1", "requestId": "r1"});
        assert_eq!(identity_key(&v).as_deref(), Some("m1:r1"));

        let v = json!({"message": {"id": "m2"}, "request_id": "r2"});
        assert_eq!(identity_key(&v).as_deref(), Some("m2:r2"));

        let v = json!({"messageId": "top", "message": {"id": "nested"}, "requestId": "r"});
        assert_eq!(identity_key(&v).as_deref(), Some("top:r"));
    }

    #[test]
    fn missing_half_yields_no_key() {
        assert_eq!(identity_key(&json!({"request_id": "r"})), None);
        assert_eq!(identity_key(&json!({"message": {"id": "m"}})), None);
        assert_eq!(identity_key(&json!({"message_id": "", "requestId": "r"})), None);
    }

    #[test]
    fn repeats_are_suppressed_and_keyless_pass() {
        let mut set = DedupSet::new();
        let keyed = json!({"message_id": "m", "requestId": "r"});
        assert!(set.is_first_occurrence(&keyed));
        assert!(!set.is_first_occurrence(&keyed));

        let keyless = json!({"usage": {"input_tokens": 1}});
        assert!(set.is_first_occurrence(&keyless));
        assert!(set.is_first_occurrence(&keyless));
        assert_eq!(set.len(), 1);
    }
}
