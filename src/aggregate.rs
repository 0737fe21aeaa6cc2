//! # Aggregation
//!
//! Scans every log root into a sorted `(timestamp, total_tokens)` sequence and
//! reduces it into the trailing 24-hour and 7-day sums.
//!
//! ## Key Functions
//!
//! - `collect_usage`: scan, filter and deduplicate usage records
//! - `summarize`: window the records and express them against a quota
//! - `aggregate_usage`: both of the above with the default 8-day lookback

use chrono::{DateTime, Duration, Local, Utc};
use serde_json::Value;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::debug;

use crate::dedup::DedupSet;
use crate::extract::extract_tokens;
use crate::models::{PlanQuota, UsageRecord, UsageSummary};
use crate::scanner::{discover_jsonl_files, JsonlLines};
use crate::timestamp::record_timestamp;

/// Scan one day past the weekly window so boundary records are never missed.
pub const LOOKBACK_DAYS: i64 = 8;
pub const DAILY_WINDOW_HOURS: i64 = 24;
pub const WEEKLY_WINDOW_HOURS: i64 = 7 * DAILY_WINDOW_HOURS;
/// Reset label used whenever there is usage in the scanned range.
pub const DAILY_RESET_LABEL: &str = "00:00";

/// Diagnostic counters for one scan; they never influence the result.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanStats {
    pub files: usize,
    pub unreadable_files: usize,
    pub lines: usize,
    pub malformed_lines: usize,
    pub bad_timestamps: usize,
    pub before_cutoff: usize,
    pub duplicates: usize,
    pub zero_usage: usize,
    pub kept: usize,
}

/// Collect deduplicated usage records at or after `cutoff`, sorted by timestamp.
pub fn collect_usage(roots: &[PathBuf], cutoff: DateTime<Utc>) -> (Vec<UsageRecord>, ScanStats) {
    let mut stats = ScanStats::default();
    let mut dedup = DedupSet::new();
    let mut records: Vec<UsageRecord> = Vec::new();
    let mut visited: HashSet<PathBuf> = HashSet::new();

    for root in roots {
        for path in discover_jsonl_files(root) {
            let canonical = path.canonicalize().unwrap_or_else(|_| path.clone());
            if !visited.insert(canonical) {
                continue;
            }
            let lines = match JsonlLines::open(&path) {
                Ok(l) => l,
                Err(err) => {
                    debug!(error = %err, "skipping unreadable log");
                    stats.unreadable_files += 1;
                    continue;
                }
            };
            stats.files += 1;
            for line in lines {
                stats.lines += 1;
                let v: Value = match serde_json::from_str(line.trim()) {
                    Ok(v) => v,
                    Err(_) => {
                        stats.malformed_lines += 1;
                        continue;
                    }
                };
                let ts = match record_timestamp(&v) {
                    Some(ts) => ts,
                    None => {
                        stats.bad_timestamps += 1;
                        continue;
                    }
                };
                if ts < cutoff {
                    stats.before_cutoff += 1;
                    continue;
                }
                if !dedup.is_first_occurrence(&v) {
                    stats.duplicates += 1;
                    continue;
                }
                let tokens = extract_tokens(&v);
                if tokens.is_zero() {
                    stats.zero_usage += 1;
                    continue;
                }
                records.push(UsageRecord::new(ts, tokens.total()));
            }
        }
    }

    records.sort_by_key(|r| r.ts);
    stats.kept = records.len();
    debug!(?stats, roots = roots.len(), "usage scan complete");
    (records, stats)
}

/// Round to one decimal place.
fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

pub fn percentage_of(tokens: u64, limit: u64) -> f64 {
    round1(tokens as f64 * 100.0 / limit as f64)
}

/// Sum of tokens for records at or after `threshold`.
pub fn window_sum(records: &[UsageRecord], threshold: DateTime<Utc>) -> u64 {
    records
        .iter()
        .filter(|r| r.ts >= threshold)
        .fold(0u64, |acc, r| acc.saturating_add(r.total_tokens))
}

/// Start of the next local calendar day, if it exists in the local zone.
pub fn next_local_midnight(now: DateTime<Utc>) -> Option<DateTime<Local>> {
    now.with_timezone(&Local)
        .date_naive()
        .succ_opt()?
        .and_hms_opt(0, 0, 0)?
        .and_local_timezone(Local)
        .earliest()
}

/// Tomorrow's local midnight as `HH:MM`.
pub fn next_midnight_label(now: DateTime<Utc>) -> String {
    next_local_midnight(now)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| DAILY_RESET_LABEL.to_string())
}

/// Window the records around `now` and express them against `quota`.
pub fn summarize(records: &[UsageRecord], quota: &PlanQuota, now: DateTime<Utc>) -> UsageSummary {
    if records.is_empty() {
        return UsageSummary {
            daily_percentage: 0.0,
            weekly_percentage: 0.0,
            reset_time: next_midnight_label(now),
            daily_tokens: 0,
            weekly_tokens: 0,
        };
    }
    let daily_tokens = window_sum(records, now - Duration::hours(DAILY_WINDOW_HOURS));
    let weekly_tokens = window_sum(records, now - Duration::hours(WEEKLY_WINDOW_HOURS));
    UsageSummary {
        daily_percentage: percentage_of(daily_tokens, quota.daily_token_limit()),
        weekly_percentage: percentage_of(weekly_tokens, quota.weekly_token_limit()),
        reset_time: DAILY_RESET_LABEL.to_string(),
        daily_tokens,
        weekly_tokens,
    }
}

/// One full aggregation pass over `roots`. Nothing is cached between calls.
pub fn aggregate_usage(roots: &[PathBuf], quota: &PlanQuota, now: DateTime<Utc>) -> UsageSummary {
    let cutoff = now - Duration::days(LOOKBACK_DAYS);
    let (records, _stats) = collect_usage(roots, cutoff);
    summarize(&records, quota, now)
}
