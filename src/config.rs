//! # Plan Resolution
//!
//! Picks the plan tier and daily token limit from CLI flags, environment and
//! the Claude settings file. Every candidate limit is validated here so the
//! aggregator can assume a positive denominator.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::cli::Args;
use crate::models::{PlanQuota, PlanTier};
use crate::utils::{env_nonempty, get_i64_any, get_string_any};

pub const ENV_PLAN_TIER: &str = "CLAUDE_PLAN_TIER";
pub const ENV_DAILY_TOKEN_LIMIT: &str = "CLAUDE_DAILY_TOKEN_LIMIT";
pub const ENV_SETTINGS_FILE: &str = "CLAUDE_SETTINGS_FILE";

const SETTINGS_SECTIONS: &[&str] = &["statusline", "claude_statusline", "claudeStatusline"];
const TIER_KEYS: &[&str] = &["plan_tier", "planTier", "plan-tier", "tier"];
const LIMIT_KEYS: &[&str] = &["daily_token_limit", "dailyTokenLimit", "daily-token-limit"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub plan_tier: Option<String>,
    pub daily_token_limit: Option<i64>,
}

pub fn parse_settings_overrides(content: &str) -> Result<SettingsOverrides> {
    let v: Value = serde_json::from_str(content)?;
    let obj = SETTINGS_SECTIONS
        .iter()
        .find_map(|k| v.get(*k).and_then(|x| x.as_object()))
        .or_else(|| v.as_object());
    Ok(match obj {
        Some(obj) => SettingsOverrides {
            plan_tier: get_string_any(obj, TIER_KEYS),
            daily_token_limit: get_i64_any(obj, LIMIT_KEYS),
        },
        None => SettingsOverrides::default(),
    })
}

fn settings_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(p) = env_nonempty(ENV_SETTINGS_FILE) {
        candidates.push(PathBuf::from(p));
    }
    if let Some(b) = directories::BaseDirs::new() {
        candidates.push(b.home_dir().join(".claude").join("settings.json"));
        candidates.push(b.config_dir().join("claude").join("settings.json"));
    }
    candidates
}

pub fn read_settings_file(path: &Path) -> Result<SettingsOverrides> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_settings_overrides(&content).with_context(|| format!("parse {}", path.display()))
}

/// First readable settings file wins; unreadable ones are logged and skipped.
pub fn read_settings_overrides() -> Option<SettingsOverrides> {
    for path in settings_candidates() {
        if !path.is_file() {
            continue;
        }
        match read_settings_file(&path) {
            Ok(s) => return Some(s),
            Err(err) => warn!(error = %err, "ignoring settings file"),
        }
    }
    None
}

fn valid_limit(source: &str, raw: Option<i64>) -> Option<u64> {
    let v = raw?;
    if v > 0 {
        Some(v as u64)
    } else {
        warn!(source, value = v, "ignoring non-positive daily token limit");
        None
    }
}

fn valid_tier(source: &str, raw: Option<&str>) -> Option<PlanTier> {
    let s = raw?;
    let tier = PlanTier::parse(s);
    if tier.is_none() {
        warn!(source, value = s, "ignoring unknown plan tier");
    }
    tier
}

/// Resolve the quota from already-gathered inputs, in precedence order.
pub fn resolve_plan(
    cli_tier: Option<PlanTier>,
    cli_limit: Option<u64>,
    settings: Option<&SettingsOverrides>,
) -> PlanQuota {
    let env_tier = env_nonempty(ENV_PLAN_TIER);
    let env_limit = env_nonempty(ENV_DAILY_TOKEN_LIMIT).and_then(|s| match s.parse::<i64>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(var = ENV_DAILY_TOKEN_LIMIT, value = %s, "ignoring unparseable daily token limit");
            None
        }
    });

    let tier = cli_tier
        .or_else(|| valid_tier("env", env_tier.as_deref()))
        .or_else(|| valid_tier("settings", settings.and_then(|s| s.plan_tier.as_deref())))
        .unwrap_or(PlanTier::Pro);

    let limit = valid_limit("cli", cli_limit.map(|v| v.min(i64::MAX as u64) as i64))
        .or_else(|| valid_limit("env", env_limit))
        .or_else(|| valid_limit("settings", settings.and_then(|s| s.daily_token_limit)));

    match limit {
        Some(l) => PlanQuota::new(tier, l).unwrap_or_else(|_| PlanQuota::for_tier(tier)),
        None => PlanQuota::for_tier(tier),
    }
}

/// Resolve the quota for this invocation from CLI args, environment and settings.
pub fn resolve_plan_config(args: &Args) -> PlanQuota {
    let settings = read_settings_overrides();
    resolve_plan(
        args.plan_tier.map(PlanTier::from),
        args.daily_token_limit,
        settings.as_ref(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clear_env() {
        unsafe {
            env::remove_var(ENV_PLAN_TIER);
            env::remove_var(ENV_DAILY_TOKEN_LIMIT);
        }
    }

    #[test]
    fn settings_section_takes_precedence_over_top_level() {
        let s = parse_settings_overrides(
            r#"{"tier": "pro", "statusline": {"planTier": "max5x", "dailyTokenLimit": "1000"}}"#,
        )
        .unwrap();
        assert_eq!(s.plan_tier.as_deref(), Some("max5x"));
        assert_eq!(s.daily_token_limit, Some(1000));
    }

    #[test]
    fn settings_top_level_fallback() {
        let s = parse_settings_overrides(r#"{"plan_tier": "max20x"}"#).unwrap();
        assert_eq!(s.plan_tier.as_deref(), Some("max20x"));
        assert_eq!(s.daily_token_limit, None);
        assert!(parse_settings_overrides("not json").is_err());
    }

    #[test]
    #[serial]
    fn defaults_to_pro() {
        clear_env();
        let q = resolve_plan(None, None, None);
        assert_eq!(q.tier, PlanTier::Pro);
        assert_eq!(q.daily_token_limit(), 45_000_000);
    }

    #[test]
    #[serial]
    fn precedence_cli_env_settings() {
        clear_env();
        let settings = SettingsOverrides {
            plan_tier: Some("max20x".into()),
            daily_token_limit: Some(300),
        };
        unsafe {
            env::set_var(ENV_PLAN_TIER, "max5x");
            env::set_var(ENV_DAILY_TOKEN_LIMIT, "200");
        }
        let q = resolve_plan(Some(PlanTier::Pro), Some(100), Some(&settings));
        assert_eq!((q.tier, q.daily_token_limit()), (PlanTier::Pro, 100));

        let q = resolve_plan(None, None, Some(&settings));
        assert_eq!((q.tier, q.daily_token_limit()), (PlanTier::Max5x, 200));

        clear_env();
        let q = resolve_plan(None, None, Some(&settings));
        assert_eq!((q.tier, q.daily_token_limit()), (PlanTier::Max20x, 300));
    }

    #[test]
    #[serial]
    fn non_positive_limits_fall_through() {
        clear_env();
        unsafe {
            env::set_var(ENV_DAILY_TOKEN_LIMIT, "-5");
        }
        let settings = SettingsOverrides {
            plan_tier: Some("bogus".into()),
            daily_token_limit: Some(0),
        };
        let q = resolve_plan(None, Some(0), Some(&settings));
        assert_eq!(q.tier, PlanTier::Pro);
        assert_eq!(q.daily_token_limit(), PlanTier::Pro.daily_token_limit());
        clear_env();
    }
}
