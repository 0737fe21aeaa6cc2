//! # Usage Statusline
//!
//! Rolling daily and weekly token usage for Claude Code, computed from the
//! local JSONL session logs and reported as a percentage of the plan quota.
//!
//! ## Overview
//!
//! Each run discovers every `*.jsonl` log under the Claude `projects` roots,
//! parses the records, drops malformed lines and unparseable timestamps,
//! deduplicates repeated events by message/request id, extracts token counts
//! across the known schema variants and sums them over the trailing 24 hours
//! and 7 days. Nothing is persisted between runs.

/// Windowing and percentage computation
pub mod aggregate;

/// Command-line argument parsing
pub mod cli;

/// Plan tier and quota resolution
pub mod config;

/// Record identity and duplicate suppression
pub mod dedup;

/// Text and JSON output
pub mod display;

/// Token counter extraction across schema variants
pub mod extract;

/// Logging setup
pub mod logging;

/// Data models for records, quotas and summaries
pub mod models;

/// Log file discovery and line streaming
pub mod scanner;

/// Timestamp parsing
pub mod timestamp;

/// Paths, env and formatting helpers
pub mod utils;
