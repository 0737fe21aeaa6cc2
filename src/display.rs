//! Plain text and JSON rendering of a usage summary.

use anyhow::{Context, Result};
use serde_json::{json, Value};

use crate::cli::LabelsArg;
use crate::models::{PlanQuota, UsageSummary};

pub fn format_text_line(summary: &UsageSummary, labels: LabelsArg) -> String {
    let (d, w, r) = match labels {
        LabelsArg::Short => ("D:", "W:", "reset"),
        LabelsArg::Long => ("Daily:", "Weekly:", "Resets:"),
    };
    format!(
        "{d} {} | {w} {} | {r} {}",
        summary.daily_label(),
        summary.weekly_label(),
        summary.reset_label()
    )
}

/// Summary fields plus display labels and the resolved plan.
pub fn build_json_output(summary: &UsageSummary, quota: &PlanQuota) -> Result<Value> {
    let mut out = serde_json::to_value(summary).context("serialize summary")?;
    if let Some(obj) = out.as_object_mut() {
        obj.insert("daily".into(), json!(summary.daily_label()));
        obj.insert("weekly".into(), json!(summary.weekly_label()));
        obj.insert(
            "plan".into(),
            json!({
                "tier": quota.tier,
                "daily_token_limit": quota.daily_token_limit(),
                "weekly_token_limit": quota.weekly_token_limit(),
            }),
        );
    }
    Ok(out)
}

pub fn print_json_output(summary: &UsageSummary, quota: &PlanQuota) -> Result<()> {
    let out = serde_json::to_string(&build_json_output(summary, quota)?).context("serialize json")?;
    println!("{out}");
    Ok(())
}

pub fn print_text_output(summary: &UsageSummary, labels: LabelsArg) {
    println!("{}", format_text_line(summary, labels));
}
