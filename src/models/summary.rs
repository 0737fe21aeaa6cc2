use serde::Serialize;

/// Engine output: percentages of the configured quota plus the reset label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageSummary {
    pub daily_percentage: f64,
    pub weekly_percentage: f64,
    pub reset_time: String,
    pub daily_tokens: u64,
    pub weekly_tokens: u64,
}

impl UsageSummary {
    pub fn daily_label(&self) -> String {
        format!("{:.1}%", self.daily_percentage)
    }

    pub fn weekly_label(&self) -> String {
        format!("{:.1}%", self.weekly_percentage)
    }

    pub fn reset_label(&self) -> &str {
        &self.reset_time
    }
}
