//! # tanrai-settings
//!
//! Configuration with layered sources.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`TanraiSettings::default()`]
//! 2. **User file**: `~/.tanrai/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `TANRAI_*` overrides (highest priority)
//!
//! Command-line flags, where a binary offers them, are applied by the caller
//! on top of the loaded value.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{
    apply_env_overrides, apply_overrides, deep_merge, load_settings, load_settings_from_path,
    settings_path, tanrai_home,
};
pub use types::*;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_valid() {
        let settings = TanraiSettings::default();
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 5000);
        assert!(settings.server.static_dir.is_none());
        assert_eq!(settings.database.pool_size, 8);
        assert!(settings.database.path.ends_with("todos.db"));
        assert_eq!(settings.logging.level, "info");
        assert!(!settings.logging.json);
        assert_eq!(settings.client.api_url, "http://127.0.0.1:5000");
    }

    #[test]
    fn settings_path_under_tanrai_home() {
        assert!(settings_path().starts_with(tanrai_home()));
        assert!(settings_path().ends_with("settings.json"));
    }
}
