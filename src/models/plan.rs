use anyhow::{bail, Result};
use serde::Serialize;

/// Daily token allowance for the Pro tier; Max tiers are 5x and 20x of it.
pub const PRO_DAILY_TOKEN_LIMIT: u64 = 45_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    Pro,
    Max5x,
    Max20x,
}

impl PlanTier {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pro" => Some(Self::Pro),
            "max5x" | "max_5x" | "5x" => Some(Self::Max5x),
            "max20x" | "max_20x" | "20x" => Some(Self::Max20x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pro => "pro",
            Self::Max5x => "max5x",
            Self::Max20x => "max20x",
        }
    }

    pub fn daily_token_limit(&self) -> u64 {
        match self {
            Self::Pro => PRO_DAILY_TOKEN_LIMIT,
            Self::Max5x => PRO_DAILY_TOKEN_LIMIT * 5,
            Self::Max20x => PRO_DAILY_TOKEN_LIMIT * 20,
        }
    }
}

/// Resolved quota. The weekly limit is always derived from the daily one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanQuota {
    pub tier: PlanTier,
    daily_token_limit: u64,
}

impl PlanQuota {
    pub fn new(tier: PlanTier, daily_token_limit: u64) -> Result<Self> {
        if daily_token_limit == 0 {
            bail!("daily token limit must be positive");
        }
        Ok(Self {
            tier,
            daily_token_limit,
        })
    }

    pub fn for_tier(tier: PlanTier) -> Self {
        Self {
            tier,
            daily_token_limit: tier.daily_token_limit(),
        }
    }

    pub fn daily_token_limit(&self) -> u64 {
        self.daily_token_limit
    }

    pub fn weekly_token_limit(&self) -> u64 {
        self.daily_token_limit.saturating_mul(7)
    }
}
