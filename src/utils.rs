use serde_json::{Map, Value};
use std::env;
use std::path::PathBuf;

/// Claude data directories that contain a `projects` folder.
///
/// An explicit comma-separated override wins when at least one entry is usable;
/// otherwise `~/.claude` then the XDG config `claude` dir are probed.
pub fn claude_paths(override_env: Option<&str>) -> Vec<PathBuf> {
    let mut paths = vec![];
    if let Some(list) = override_env {
        let list = list.trim();
        if !list.is_empty() {
            for p in list.split(',') {
                let p = p.trim();
                if p.is_empty() {
                    continue;
                }
                let pb = PathBuf::from(p);
                if pb.join("projects").is_dir() {
                    paths.push(pb);
                }
            }
            if !paths.is_empty() {
                return paths;
            }
        }
    }
    let basedirs = directories::BaseDirs::new();
    let home = basedirs
        .as_ref()
        .map(|b| b.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~"));
    let xdg_config = basedirs
        .as_ref()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| home.join(".config"));
    for base in [home.join(".claude"), xdg_config.join("claude")].into_iter() {
        if base.join("projects").is_dir() {
            paths.push(base);
        }
    }
    paths
}

/// The `projects` log roots for each Claude data directory.
pub fn log_roots(override_env: Option<&str>) -> Vec<PathBuf> {
    claude_paths(override_env)
        .into_iter()
        .map(|p| p.join("projects"))
        .collect()
}

pub fn format_tokens(n: u64) -> String {
    if n >= 1_000_000_000 {
        format!("{:.1}B", n as f64 / 1e9)
    } else if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1e6)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1e3)
    } else {
        n.to_string()
    }
}

pub(crate) fn env_nonempty(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub(crate) fn get_string_any(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    for k in keys {
        if let Some(s) = obj.get(*k).and_then(|v| v.as_str()) {
            return Some(s.to_string());
        }
    }
    None
}

/// Numeric setting as an integer; accepts JSON numbers and numeric strings.
pub(crate) fn get_i64_any(obj: &Map<String, Value>, keys: &[&str]) -> Option<i64> {
    for k in keys {
        if let Some(n) = obj.get(*k) {
            if let Some(i) = n.as_i64() {
                return Some(i);
            }
            if let Some(f) = n.as_f64() {
                return Some(f as i64);
            }
            if let Some(s) = n.as_str() {
                if let Ok(v) = s.trim().parse::<i64>() {
                    return Some(v);
                }
            }
        }
    }
    None
}
