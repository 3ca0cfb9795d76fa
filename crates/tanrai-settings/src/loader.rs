//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`TanraiSettings::default()`]
//! 2. If the settings file exists, deep-merge user values over defaults
//! 3. Apply `TANRAI_*` environment overrides (highest priority)
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::types::TanraiSettings;

/// `~/.tanrai`, falling back to `/tmp/.tanrai` without `HOME`.
pub fn tanrai_home() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".tanrai")
}

/// Resolve the path to the settings file (`~/.tanrai/settings.json`).
pub fn settings_path() -> PathBuf {
    tanrai_home().join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<TanraiSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// A missing file yields defaults; invalid JSON is an error.
pub fn load_settings_from_path(path: &Path) -> Result<TanraiSettings> {
    let defaults = serde_json::to_value(TanraiSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: TanraiSettings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings);
    settings.validate()?;
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply `TANRAI_*` environment variable overrides.
pub fn apply_env_overrides(settings: &mut TanraiSettings) {
    apply_overrides(settings, |name| std::env::var(name).ok());
}

/// Apply overrides read through `lookup`.
///
/// - Integers must parse and fall within the documented range
/// - Booleans accept `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`
/// - Empty strings are treated as unset
/// - Invalid values are logged and ignored
pub fn apply_overrides<F>(settings: &mut TanraiSettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let read = |name: &str| lookup(name).filter(|v| !v.is_empty());

    // ── Server ──────────────────────────────────────────────────────
    if let Some(v) = read("TANRAI_HOST") {
        settings.server.host = v;
    }
    if let Some(v) = read("TANRAI_PORT") {
        match parse_u16_range(&v, 1, 65535) {
            Some(port) => settings.server.port = port,
            None => invalid("TANRAI_PORT", &v),
        }
    }
    if let Some(v) = read("TANRAI_STATIC_DIR") {
        settings.server.static_dir = Some(v);
    }

    // ── Database ────────────────────────────────────────────────────
    if let Some(v) = read("TANRAI_DB_PATH") {
        settings.database.path = v;
    }
    if let Some(v) = read("TANRAI_POOL_SIZE") {
        match parse_u32_range(&v, 1, 64) {
            Some(size) => settings.database.pool_size = size,
            None => invalid("TANRAI_POOL_SIZE", &v),
        }
    }

    // ── Logging ─────────────────────────────────────────────────────
    if let Some(v) = read("TANRAI_LOG_LEVEL") {
        settings.logging.level = v;
    }
    if let Some(v) = read("TANRAI_LOG_JSON") {
        match parse_bool(&v) {
            Some(json) => settings.logging.json = json,
            None => invalid("TANRAI_LOG_JSON", &v),
        }
    }

    // ── Client ──────────────────────────────────────────────────────
    if let Some(v) = read("TANRAI_API_URL") {
        settings.client.api_url = v;
    }
    if let Some(v) = read("TANRAI_API_TIMEOUT_SECS") {
        match parse_u32_range(&v, 1, 300) {
            Some(secs) => settings.client.timeout_secs = secs,
            None => invalid("TANRAI_API_TIMEOUT_SECS", &v),
        }
    }
}

fn invalid(key: &str, value: &str) {
    tracing::warn!(key, value, "invalid env var, ignoring");
}

// ── Pure parsing functions ──────────────────────────────────────────────────

/// Parse a string as a boolean.
///
/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a string as a `u16` within a range.
pub fn parse_u16_range(val: &str, min: u16, max: u16) -> Option<u16> {
    let n: u16 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

/// Parse a string as a `u32` within a range.
pub fn parse_u32_range(val: &str, min: u32, max: u32) -> Option<u32> {
    let n: u32 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
