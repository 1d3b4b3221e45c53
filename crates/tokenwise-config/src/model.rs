// SPDX-FileCopyrightText: 2026 Tokenwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the tokenwise engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tokenwise_core::types::{
    DEFAULT_DAYS_PER_MONTH, DEFAULT_DEVELOPER_COUNT, DEFAULT_QUERIES_PER_DEV_PER_DAY,
};
use tokenwise_core::{ModelPricingPreset, Severity, UsageAssumptions};

/// Top-level tokenwise configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to the built-in tables.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TokenwiseConfig {
    /// Logging settings for the host binary.
    #[serde(default)]
    pub log: LogConfig,

    /// Pricing preset registry and default selection.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Default team usage assumptions.
    #[serde(default)]
    pub usage: UsageConfig,

    /// Acceptance-rate prediction settings.
    #[serde(default)]
    pub acceptance: AcceptanceConfig,

    /// Value-chain generation settings.
    #[serde(default)]
    pub value_chain: ValueChainConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Pricing registry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PricingConfig {
    /// Preset used when the caller names none, or names an unknown one.
    #[serde(default = "default_preset")]
    pub default_preset: String,

    /// Registered presets keyed by model identifier.
    #[serde(default = "default_presets")]
    pub presets: BTreeMap<String, PresetConfig>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            default_preset: default_preset(),
            presets: default_presets(),
        }
    }
}

impl PricingConfig {
    /// Materialize the preset table as domain values, sorted by name.
    pub fn to_presets(&self) -> Vec<ModelPricingPreset> {
        self.presets
            .iter()
            .map(|(name, preset)| ModelPricingPreset {
                name: name.clone(),
                price_per_1k_tokens: preset.price_per_1k_tokens,
                baseline_confidence: preset.baseline_confidence,
            })
            .collect()
    }
}

/// Lookup key for a preset name. Preset names are case-insensitive.
pub fn preset_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A single pricing preset entry.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PresetConfig {
    /// Price in currency units per 1000 tokens.
    pub price_per_1k_tokens: f64,

    /// Confidence attached to estimates priced with this preset.
    #[serde(default = "default_baseline_confidence")]
    pub baseline_confidence: f64,
}

fn default_preset() -> String {
    "gpt-4o".to_string()
}

fn default_baseline_confidence() -> f64 {
    0.85
}

/// Built-in preset table.
///
/// OpenAI prices are the blended per-1K figures used for context-waste
/// costing; Claude prices are input-token list prices.
fn default_presets() -> BTreeMap<String, PresetConfig> {
    [
        ("gpt-4o", 0.005, 0.85),
        ("gpt-4o-mini", 0.00015, 0.8),
        ("gpt-5.3", 0.002, 0.85),
        ("claude-haiku", 0.0008, 0.8),
        ("claude-sonnet", 0.003, 0.85),
        ("claude-opus", 0.015, 0.85),
    ]
    .into_iter()
    .map(|(name, price, confidence)| {
        (
            name.to_string(),
            PresetConfig {
                price_per_1k_tokens: price,
                baseline_confidence: confidence,
            },
        )
    })
    .collect()
}

/// Team usage assumptions.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UsageConfig {
    /// Developers sharing the analyzed codebase.
    #[serde(default = "default_developer_count")]
    pub developer_count: u32,

    /// AI queries per developer per working day.
    #[serde(default = "default_queries_per_dev_per_day")]
    pub queries_per_dev_per_day: u32,

    /// Billable days per month.
    #[serde(default = "default_days_per_month")]
    pub days_per_month: u32,
}

impl Default for UsageConfig {
    fn default() -> Self {
        Self {
            developer_count: default_developer_count(),
            queries_per_dev_per_day: default_queries_per_dev_per_day(),
            days_per_month: default_days_per_month(),
        }
    }
}

impl From<&UsageConfig> for UsageAssumptions {
    fn from(config: &UsageConfig) -> Self {
        Self {
            developer_count: config.developer_count,
            queries_per_dev_per_day: config.queries_per_dev_per_day,
            days_per_month: config.days_per_month,
        }
    }
}

fn default_developer_count() -> u32 {
    DEFAULT_DEVELOPER_COUNT
}

fn default_queries_per_dev_per_day() -> u32 {
    DEFAULT_QUERIES_PER_DEV_PER_DAY
}

fn default_days_per_month() -> u32 {
    DEFAULT_DAYS_PER_MONTH
}

/// Acceptance-rate predictor configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AcceptanceConfig {
    /// Acceptance rate assumed with no quality signal at all.
    #[serde(default = "default_base_rate")]
    pub base_rate: f64,

    /// Score at which a tool neither raises nor lowers the rate.
    #[serde(default = "default_neutral_score")]
    pub neutral_score: f64,

    /// Influence of each analyzer on the prediction. Tools missing here are ignored.
    #[serde(default = "default_tool_weights")]
    pub tool_weights: BTreeMap<String, f64>,
}

impl Default for AcceptanceConfig {
    fn default() -> Self {
        Self {
            base_rate: default_base_rate(),
            neutral_score: default_neutral_score(),
            tool_weights: default_tool_weights(),
        }
    }
}

fn default_base_rate() -> f64 {
    0.3
}

fn default_neutral_score() -> f64 {
    50.0
}

fn default_tool_weights() -> BTreeMap<String, f64> {
    [
        ("pattern-detect", 0.3),
        ("context-analyzer", 0.4),
        ("consistency", 0.2),
        ("doc-drift", 0.1),
    ]
    .into_iter()
    .map(|(tool, weight)| (tool.to_string(), weight))
    .collect()
}

/// How the number of occurrences of an issue scales its opportunity cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CountScaling {
    /// Severity alone drives cost; `count` is carried but not applied.
    #[default]
    Independent,
    /// Cost grows linearly with `count`.
    Linear,
}

/// Value-chain generator configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ValueChainConfig {
    /// Monthly value of one unit of affected developer productivity.
    #[serde(default = "default_baseline_monthly_value")]
    pub baseline_monthly_value: f64,

    /// Occurrence-count scaling policy.
    #[serde(default)]
    pub count_scaling: CountScaling,

    /// Productivity loss per severity.
    #[serde(default)]
    pub productivity_loss: SeverityTable,
}

impl Default for ValueChainConfig {
    fn default() -> Self {
        Self {
            baseline_monthly_value: default_baseline_monthly_value(),
            count_scaling: CountScaling::default(),
            productivity_loss: SeverityTable::default(),
        }
    }
}

fn default_baseline_monthly_value() -> f64 {
    15_000.0
}

/// Severity-keyed productivity-loss fractions.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SeverityTable {
    #[serde(default = "default_minor_loss")]
    pub minor: f64,
    #[serde(default = "default_major_loss")]
    pub major: f64,
    #[serde(default = "default_critical_loss")]
    pub critical: f64,
}

impl Default for SeverityTable {
    fn default() -> Self {
        Self {
            minor: default_minor_loss(),
            major: default_major_loss(),
            critical: default_critical_loss(),
        }
    }
}

impl SeverityTable {
    /// Loss fraction for the given severity.
    pub fn get(&self, severity: Severity) -> f64 {
        match severity {
            Severity::Minor => self.minor,
            Severity::Major => self.major,
            Severity::Critical => self.critical,
        }
    }
}

fn default_minor_loss() -> f64 {
    0.05
}

fn default_major_loss() -> f64 {
    0.15
}

fn default_critical_loss() -> f64 {
    0.25
}
