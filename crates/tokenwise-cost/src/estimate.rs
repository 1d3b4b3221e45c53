// SPDX-FileCopyrightText: 2026 Tokenwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Monthly cost estimation for wasted context tokens.
//!
//! Formula: `wasted_per_query * queries_per_dev_per_day * developer_count *
//! days_per_month / 1000 * price_per_1k_tokens`, bracketed by a fixed +/-15%
//! band.
//!
//! Confidence is a two-tier step function: the preset's baseline, or the low
//! tier once the per-query waste exceeds [`HIGH_WASTE_THRESHOLD_TOKENS`].

use tokenwise_config::TokenwiseConfig;
use tokenwise_core::{CostEstimate, ModelPricingPreset, TokenBudget, TokenwiseError, UsageAssumptions};
use tracing::{debug, warn};

use crate::pricing::PricingRegistry;

/// Half-width of the uncertainty band, as a fraction of the point estimate.
pub const COST_RANGE_SPREAD: f64 = 0.15;

/// Per-query wasted tokens above which confidence drops to the low tier.
pub const HIGH_WASTE_THRESHOLD_TOKENS: u64 = 50_000;

/// Confidence applied to high-waste estimates.
pub const LOW_CONFIDENCE_TIER: f64 = 0.7;

/// Threshold-triggered confidence policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidencePolicy {
    /// Waste strictly above this many tokens triggers the low tier.
    pub high_waste_threshold: u64,
    /// Confidence used once the threshold is exceeded.
    pub low_confidence: f64,
}

impl Default for ConfidencePolicy {
    fn default() -> Self {
        Self {
            high_waste_threshold: HIGH_WASTE_THRESHOLD_TOKENS,
            low_confidence: LOW_CONFIDENCE_TIER,
        }
    }
}

impl ConfidencePolicy {
    /// Confidence for an estimate over `wasted_tokens` priced at `baseline`.
    ///
    /// The low tier never raises confidence above the preset's baseline.
    pub fn confidence_for(&self, baseline: f64, wasted_tokens: u64) -> f64 {
        if wasted_tokens > self.high_waste_threshold {
            baseline.min(self.low_confidence)
        } else {
            baseline
        }
    }
}

/// Prices token waste into calibrated monthly cost estimates.
#[derive(Debug, Clone, Default)]
pub struct CostEstimator {
    registry: PricingRegistry,
    default_usage: UsageAssumptions,
    policy: ConfidencePolicy,
}

impl CostEstimator {
    /// Create an estimator over `registry`, using `default_usage` when the
    /// caller supplies no assumptions.
    pub fn new(
        registry: PricingRegistry,
        default_usage: UsageAssumptions,
    ) -> Result<Self, TokenwiseError> {
        default_usage.validate()?;
        Ok(Self {
            registry,
            default_usage,
            policy: ConfidencePolicy::default(),
        })
    }

    /// Build from the `[pricing]` and `[usage]` config sections.
    pub fn from_config(config: &TokenwiseConfig) -> Result<Self, TokenwiseError> {
        let registry = PricingRegistry::from_config(&config.pricing)?;
        Self::new(registry, UsageAssumptions::from(&config.usage))
    }

    /// Replace the confidence policy.
    pub fn with_policy(mut self, policy: ConfidencePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The pricing registry this estimator resolves preset names against.
    pub fn registry(&self) -> &PricingRegistry {
        &self.registry
    }

    /// Usage assumptions applied when the caller supplies none.
    pub fn default_usage(&self) -> &UsageAssumptions {
        &self.default_usage
    }

    /// Estimate the monthly cost of the waste recorded in `budget`.
    pub fn estimate_cost(
        &self,
        budget: &TokenBudget,
        preset: &ModelPricingPreset,
        usage: Option<&UsageAssumptions>,
    ) -> Result<CostEstimate, TokenwiseError> {
        self.price(budget.wasted_tokens.total, preset, usage)
    }

    /// Estimate the monthly cost of a raw per-query token count, priced with
    /// the default preset.
    pub fn calculate_monthly_cost(
        &self,
        tokens: u64,
        usage: Option<&UsageAssumptions>,
    ) -> Result<CostEstimate, TokenwiseError> {
        self.price(tokens, self.registry.default_preset(), usage)
    }

    /// Like [`calculate_monthly_cost`](Self::calculate_monthly_cost), pricing
    /// with the named preset. Unknown names fall back to the default preset.
    pub fn calculate_monthly_cost_with_preset(
        &self,
        tokens: u64,
        preset: Option<&str>,
        usage: Option<&UsageAssumptions>,
    ) -> Result<CostEstimate, TokenwiseError> {
        self.price(tokens, self.registry.lookup_or_default(preset), usage)
    }

    fn price(
        &self,
        wasted_tokens: u64,
        preset: &ModelPricingPreset,
        usage: Option<&UsageAssumptions>,
    ) -> Result<CostEstimate, TokenwiseError> {
        preset.validate()?;
        let usage = usage.unwrap_or(&self.default_usage);
        usage.validate()?;

        let monthly_wasted_tokens = wasted_tokens as f64 * usage.monthly_queries();
        let total = monthly_wasted_tokens / 1000.0 * preset.price_per_1k_tokens;
        let range = [
            total * (1.0 - COST_RANGE_SPREAD),
            total * (1.0 + COST_RANGE_SPREAD),
        ];

        let confidence = self
            .policy
            .confidence_for(preset.baseline_confidence, wasted_tokens);
        if confidence < preset.baseline_confidence {
            warn!(
                wasted_tokens,
                threshold = self.policy.high_waste_threshold,
                confidence,
                "high waste volume, estimate confidence downgraded"
            );
        }

        debug!(
            preset = %preset.name,
            wasted_tokens,
            monthly_wasted_tokens,
            total,
            confidence,
            "estimated monthly cost"
        );

        Ok(CostEstimate {
            total,
            range,
            confidence,
        })
    }
}
