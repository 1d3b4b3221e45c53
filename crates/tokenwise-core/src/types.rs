// SPDX-FileCopyrightText: 2026 Tokenwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Value types flowing through the unit-economics engine.
//!
//! Every type here is a plain value object: built once per invocation,
//! never mutated afterwards, and serializable with camelCase field names so
//! report generators can emit them as-is.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::TokenwiseError;

/// Default team size used when the caller supplies no usage assumptions.
pub const DEFAULT_DEVELOPER_COUNT: u32 = 5;

/// Default number of AI queries each developer issues per working day.
pub const DEFAULT_QUERIES_PER_DEV_PER_DAY: u32 = 50;

/// Default number of billable days per month.
pub const DEFAULT_DAYS_PER_MONTH: u32 = 30;

// --- Token budget types ---

/// Wasted tokens per category, as reported by upstream analyzers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WastedTokenBreakdown {
    /// Tokens spent on duplicated content.
    pub duplication: u64,
    /// Tokens spent on fragmentation overhead (imports, re-reads).
    pub fragmentation: u64,
    /// Tokens spent on chatty, redundant content.
    pub chattiness: u64,
}

impl WastedTokenBreakdown {
    /// Sum of all categories. Saturates instead of wrapping.
    pub fn total(&self) -> u64 {
        self.duplication
            .saturating_add(self.fragmentation)
            .saturating_add(self.chattiness)
    }
}

/// Wasted tokens per category together with their sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WastedTokens {
    pub duplication: u64,
    pub fragmentation: u64,
    pub chattiness: u64,
    /// Always `duplication + fragmentation + chattiness`.
    pub total: u64,
}

impl From<WastedTokenBreakdown> for WastedTokens {
    fn from(breakdown: WastedTokenBreakdown) -> Self {
        Self {
            duplication: breakdown.duplication,
            fragmentation: breakdown.fragmentation,
            chattiness: breakdown.chattiness,
            total: breakdown.total(),
        }
    }
}

/// Normalized token budget for one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBudget {
    /// Total context tokens observed.
    pub total_context_tokens: u64,
    /// Waste breakdown with its total.
    pub wasted_tokens: WastedTokens,
    /// Fraction of the context carrying non-wasted content, in `[0, 1]`.
    pub efficiency_ratio: f64,
    /// Wasted tokens a refactor could realistically win back.
    pub potential_retrievable_tokens: u64,
}

// --- Pricing and cost types ---

/// Named cost-per-token profile for one model family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPricingPreset {
    /// Registry key, e.g. `gpt-4o`.
    pub name: String,
    /// Price in currency units per 1000 tokens. Always positive.
    #[serde(rename = "pricePer1KTokens")]
    pub price_per_1k_tokens: f64,
    /// Confidence attached to estimates priced with this preset, in `(0, 1]`.
    pub baseline_confidence: f64,
}

impl ModelPricingPreset {
    /// Build a preset, rejecting non-positive prices and confidences outside `(0, 1]`.
    pub fn new(
        name: impl Into<String>,
        price_per_1k_tokens: f64,
        baseline_confidence: f64,
    ) -> Result<Self, TokenwiseError> {
        let preset = Self {
            name: name.into(),
            price_per_1k_tokens,
            baseline_confidence,
        };
        preset.validate()?;
        Ok(preset)
    }

    /// Check the price and confidence domains.
    pub fn validate(&self) -> Result<(), TokenwiseError> {
        if !self.price_per_1k_tokens.is_finite() || self.price_per_1k_tokens <= 0.0 {
            return Err(TokenwiseError::invalid_input(
                "pricePer1KTokens",
                format!(
                    "preset `{}` must have a positive price, got {}",
                    self.name, self.price_per_1k_tokens
                ),
            ));
        }
        if !(self.baseline_confidence > 0.0 && self.baseline_confidence <= 1.0) {
            return Err(TokenwiseError::invalid_input(
                "baselineConfidence",
                format!(
                    "preset `{}` must have a confidence in (0, 1], got {}",
                    self.name, self.baseline_confidence
                ),
            ));
        }
        Ok(())
    }
}

/// Team usage figures that scale per-query waste up to a monthly volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageAssumptions {
    pub developer_count: u32,
    pub queries_per_dev_per_day: u32,
    pub days_per_month: u32,
}

impl Default for UsageAssumptions {
    fn default() -> Self {
        Self {
            developer_count: DEFAULT_DEVELOPER_COUNT,
            queries_per_dev_per_day: DEFAULT_QUERIES_PER_DEV_PER_DAY,
            days_per_month: DEFAULT_DAYS_PER_MONTH,
        }
    }
}

impl UsageAssumptions {
    /// Build usage assumptions, rejecting zero in any field.
    pub fn new(
        developer_count: u32,
        queries_per_dev_per_day: u32,
        days_per_month: u32,
    ) -> Result<Self, TokenwiseError> {
        let usage = Self {
            developer_count,
            queries_per_dev_per_day,
            days_per_month,
        };
        usage.validate()?;
        Ok(usage)
    }

    /// Every field must be strictly positive.
    pub fn validate(&self) -> Result<(), TokenwiseError> {
        let fields = [
            ("developerCount", self.developer_count),
            ("queriesPerDevPerDay", self.queries_per_dev_per_day),
            ("daysPerMonth", self.days_per_month),
        ];
        for (field, value) in fields {
            if value == 0 {
                return Err(TokenwiseError::invalid_input(field, "must be positive, got 0"));
            }
        }
        Ok(())
    }

    /// Number of queries the whole team issues in a month.
    pub fn monthly_queries(&self) -> f64 {
        f64::from(self.developer_count)
            * f64::from(self.queries_per_dev_per_day)
            * f64::from(self.days_per_month)
    }
}

/// Calibrated monthly cost estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    /// Point estimate in currency units.
    pub total: f64,
    /// `[low, high]` uncertainty band around `total`.
    pub range: [f64; 2],
    /// Confidence in the estimate, in `(0, 1]`.
    pub confidence: f64,
}

impl CostEstimate {
    /// Lower bound of the uncertainty band.
    pub fn low(&self) -> f64 {
        self.range[0]
    }

    /// Upper bound of the uncertainty band.
    pub fn high(&self) -> f64 {
        self.range[1]
    }
}

// --- Acceptance prediction types ---

/// Scoring output produced by one upstream analyzer.
///
/// Only `tool_name` and `score` are read by the engine; the rest is an
/// opaque, tool-defined payload carried along untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolScoringOutput {
    pub tool_name: String,
    /// Quality score in `[0, 100]`.
    pub score: f64,
    #[serde(default)]
    pub raw_metrics: serde_json::Value,
    #[serde(default)]
    pub factors: Vec<serde_json::Value>,
    #[serde(default)]
    pub recommendations: Vec<serde_json::Value>,
}

impl ToolScoringOutput {
    /// Build an output carrying only a name and a score.
    pub fn new(tool_name: impl Into<String>, score: f64) -> Self {
        Self {
            tool_name: tool_name.into(),
            score,
            raw_metrics: serde_json::Value::Object(serde_json::Map::new()),
            factors: Vec::new(),
            recommendations: Vec::new(),
        }
    }
}

/// One tool's attributed share of an acceptance prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptanceFactor {
    pub tool_name: String,
    pub weight: f64,
    /// Signed shift applied to the base rate.
    pub contribution: f64,
}

/// Predicted fraction of AI suggestions a developer would accept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptancePrediction {
    /// Predicted rate, clamped to `[0, 1]`.
    pub rate: f64,
    pub factors: Vec<AcceptanceFactor>,
}

// --- Value chain types ---

/// Issue severity as classified upstream.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Minor,
    Major,
    Critical,
}

/// Category of a classified code-quality issue.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum IssueType {
    ContextFragmentation,
    DuplicatePattern,
    NamingInconsistency,
    DocDrift,
    DependencyHealth,
    ChangeAmplification,
}

/// A single classified issue handed to the value-chain generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueClassification {
    pub issue_type: IssueType,
    /// Number of occurrences. Must be positive.
    pub count: u32,
    pub severity: Severity,
}

/// Developer-facing impact of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperImpact {
    /// Fraction of productivity lost, in `[0, 1]`.
    pub productivity_loss: f64,
}

/// Organizational impact of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessOutcome {
    /// Mirrors the issue severity.
    pub risk_level: Severity,
    /// Currency units lost per month.
    pub opportunity_cost: f64,
}

/// Mapping from a technical issue to its productivity and cost impact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueChain {
    pub developer_impact: DeveloperImpact,
    pub business_outcome: BusinessOutcome,
}
