use chrono::{DateTime, Utc};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UsageRecord {
    pub ts: DateTime<Utc>,
    pub total_tokens: u64,
}

impl UsageRecord {
    pub fn new(ts: DateTime<Utc>, total_tokens: u64) -> Self {
        Self { ts, total_tokens }
    }
}
