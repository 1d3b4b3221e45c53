// SPDX-FileCopyrightText: 2026 Tokenwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as positive prices, fractions within `[0, 1]`, and a default preset
//! that actually exists in the table.

use std::collections::BTreeMap;

use crate::diagnostic::ConfigError;
use crate::model::{preset_key, TokenwiseConfig};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &TokenwiseConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.log.level.to_lowercase().as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level `{}` must be one of: {}",
                config.log.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    // Pricing presets
    let mut seen: BTreeMap<String, &str> = BTreeMap::new();
    for name in config.pricing.presets.keys() {
        if let Some(first) = seen.insert(preset_key(name), name) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "pricing.presets.{name} collides with `{first}` (preset names are case-insensitive)"
                ),
            });
        }
    }

    if config.pricing.presets.is_empty() {
        errors.push(ConfigError::Validation {
            message: "pricing.presets must contain at least one preset".to_string(),
        });
    } else if !seen.contains_key(&preset_key(&config.pricing.default_preset)) {
        errors.push(ConfigError::Validation {
            message: format!(
                "pricing.default_preset `{}` is not a registered preset",
                config.pricing.default_preset
            ),
        });
    }

    for (name, preset) in &config.pricing.presets {
        if !preset.price_per_1k_tokens.is_finite() || preset.price_per_1k_tokens <= 0.0 {
            errors.push(ConfigError::Validation {
                message: format!(
                    "pricing.presets.{name}.price_per_1k_tokens must be positive, got {}",
                    preset.price_per_1k_tokens
                ),
            });
        }
        if !(preset.baseline_confidence > 0.0 && preset.baseline_confidence <= 1.0) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "pricing.presets.{name}.baseline_confidence must be in (0, 1], got {}",
                    preset.baseline_confidence
                ),
            });
        }
    }

    // Usage
    let usage = [
        ("developer_count", config.usage.developer_count),
        ("queries_per_dev_per_day", config.usage.queries_per_dev_per_day),
        ("days_per_month", config.usage.days_per_month),
    ];
    for (key, value) in usage {
        if value == 0 {
            errors.push(ConfigError::Validation {
                message: format!("usage.{key} must be positive, got 0"),
            });
        }
    }

    // Acceptance
    if !is_fraction(config.acceptance.base_rate) {
        errors.push(ConfigError::Validation {
            message: format!(
                "acceptance.base_rate must be in [0, 1], got {}",
                config.acceptance.base_rate
            ),
        });
    }

    if !(0.0..=100.0).contains(&config.acceptance.neutral_score) {
        errors.push(ConfigError::Validation {
            message: format!(
                "acceptance.neutral_score must be in [0, 100], got {}",
                config.acceptance.neutral_score
            ),
        });
    }

    for (tool, weight) in &config.acceptance.tool_weights {
        if !weight.is_finite() || *weight < 0.0 {
            errors.push(ConfigError::Validation {
                message: format!(
                    "acceptance.tool_weights.{tool} must be non-negative, got {weight}"
                ),
            });
        }
    }

    // Value chain
    if !config.value_chain.baseline_monthly_value.is_finite()
        || config.value_chain.baseline_monthly_value < 0.0
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "value_chain.baseline_monthly_value must be non-negative, got {}",
                config.value_chain.baseline_monthly_value
            ),
        });
    }

    let loss = &config.value_chain.productivity_loss;
    for (key, value) in [
        ("minor", loss.minor),
        ("major", loss.major),
        ("critical", loss.critical),
    ] {
        if !is_fraction(value) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "value_chain.productivity_loss.{key} must be in [0, 1], got {value}"
                ),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_fraction(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}
