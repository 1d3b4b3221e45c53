// SPDX-FileCopyrightText: 2026 Tokenwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./tokenwise.toml` > `~/.config/tokenwise/tokenwise.toml` >
//! `/etc/tokenwise/tokenwise.toml` with environment variable overrides via `TOKENWISE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TokenwiseConfig;

/// Local config file name, looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "tokenwise.toml";

/// System-wide config file path.
pub const SYSTEM_CONFIG_FILE: &str = "/etc/tokenwise/tokenwise.toml";

/// Config sections that environment variables can address.
const ENV_SECTIONS: &[&str] = &["value_chain", "acceptance", "pricing", "usage", "log"];

/// Path of the per-user config file, if a config dir exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tokenwise").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/tokenwise/tokenwise.toml` (system-wide)
/// 3. `~/.config/tokenwise/tokenwise.toml` (user XDG config)
/// 4. `./tokenwise.toml` (local directory)
/// 5. `TOKENWISE_*` environment variables
pub fn load_config() -> Result<TokenwiseConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<TokenwiseConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TokenwiseConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TokenwiseConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TokenwiseConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(TokenwiseConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_FILE))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Create the environment variable provider mapping the section prefix to a dot.
///
/// Only the leading section name is split off, so underscore-containing keys
/// survive intact: `TOKENWISE_USAGE_DEVELOPER_COUNT` maps to
/// `usage.developer_count`, and `TOKENWISE_VALUE_CHAIN_BASELINE_MONTHLY_VALUE`
/// maps to `value_chain.baseline_monthly_value`.
fn env_provider() -> Env {
    Env::prefixed("TOKENWISE_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a lowercased, prefix-stripped env var name to a dotted config path.
pub fn map_env_key(key: &str) -> String {
    for section in ENV_SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_split_only_the_section() {
        assert_eq!(map_env_key("usage_developer_count"), "usage.developer_count");
        assert_eq!(
            map_env_key("value_chain_baseline_monthly_value"),
            "value_chain.baseline_monthly_value"
        );
        assert_eq!(map_env_key("pricing_default_preset"), "pricing.default_preset");
        assert_eq!(map_env_key("log_level"), "log.level");
    }

    #[test]
    fn unknown_env_section_is_left_alone() {
        assert_eq!(map_env_key("telemetry_enabled"), "telemetry_enabled");
    }

    #[test]
    fn user_config_path_ends_with_file_name() {
        if let Some(path) = user_config_path() {
            assert!(path.ends_with("tokenwise/tokenwise.toml"));
        }
    }
}
