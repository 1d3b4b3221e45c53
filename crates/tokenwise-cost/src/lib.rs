// SPDX-FileCopyrightText: 2026 Tokenwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Unit-economics engine for code-quality signals.
//!
//! This crate provides:
//! - **Pricing**: an immutable registry of model pricing presets
//! - **Token budget**: waste breakdown to efficiency ratio and recoverable tokens
//! - **Cost estimator**: monthly cost with an uncertainty band and calibrated confidence
//! - **Acceptance predictor**: weighted fusion of per-tool scores into an acceptance rate
//! - **Value chain**: issue severity to productivity loss and opportunity cost
//!
//! Every component is a pure function of its inputs and its (immutable)
//! tables, so one [`Economics`] can be shared freely across threads.

pub mod acceptance;
pub mod budget;
pub mod estimate;
pub mod pricing;
pub mod value_chain;

use std::collections::BTreeMap;

pub use acceptance::AcceptancePredictor;
pub use budget::{compute_budget, try_compute_budget, RECOVERY_FACTOR};
pub use estimate::{
    ConfidencePolicy, CostEstimator, COST_RANGE_SPREAD, HIGH_WASTE_THRESHOLD_TOKENS,
    LOW_CONFIDENCE_TIER,
};
pub use pricing::{lookup_pricing_preset, PricingRegistry};
pub use value_chain::ValueChainGenerator;

use tokenwise_config::TokenwiseConfig;
use tokenwise_core::{
    AcceptancePrediction, CostEstimate, IssueClassification, ModelPricingPreset, TokenBudget,
    ToolScoringOutput, TokenwiseError, UsageAssumptions, ValueChain,
};

/// All engine components, built from one configuration.
#[derive(Debug, Clone, Default)]
pub struct Economics {
    estimator: CostEstimator,
    acceptance: AcceptancePredictor,
    value_chain: ValueChainGenerator,
}

impl Economics {
    /// Build every component from a loaded configuration.
    pub fn from_config(config: &TokenwiseConfig) -> Result<Self, TokenwiseError> {
        Ok(Self {
            estimator: CostEstimator::from_config(config)?,
            acceptance: AcceptancePredictor::from_config(&config.acceptance)?,
            value_chain: ValueChainGenerator::from_config(&config.value_chain)?,
        })
    }

    /// Assemble from individually configured components.
    pub fn new(
        estimator: CostEstimator,
        acceptance: AcceptancePredictor,
        value_chain: ValueChainGenerator,
    ) -> Self {
        Self {
            estimator,
            acceptance,
            value_chain,
        }
    }

    pub fn estimator(&self) -> &CostEstimator {
        &self.estimator
    }

    pub fn registry(&self) -> &PricingRegistry {
        self.estimator.registry()
    }

    /// Look up a pricing preset by name.
    pub fn lookup_pricing_preset(&self, name: &str) -> Result<&ModelPricingPreset, TokenwiseError> {
        self.estimator.registry().lookup(name)
    }

    /// See [`CostEstimator::estimate_cost`].
    pub fn estimate_cost(
        &self,
        budget: &TokenBudget,
        preset: &ModelPricingPreset,
        usage: Option<&UsageAssumptions>,
    ) -> Result<CostEstimate, TokenwiseError> {
        self.estimator.estimate_cost(budget, preset, usage)
    }

    /// See [`CostEstimator::calculate_monthly_cost`].
    pub fn calculate_monthly_cost(
        &self,
        tokens: u64,
        usage: Option<&UsageAssumptions>,
    ) -> Result<CostEstimate, TokenwiseError> {
        self.estimator.calculate_monthly_cost(tokens, usage)
    }

    /// See [`AcceptancePredictor::predict_acceptance_rate`].
    pub fn predict_acceptance_rate(
        &self,
        tool_outputs: &BTreeMap<String, ToolScoringOutput>,
    ) -> Result<AcceptancePrediction, TokenwiseError> {
        self.acceptance.predict_acceptance_rate(tool_outputs)
    }

    /// See [`ValueChainGenerator::generate_value_chain`].
    pub fn generate_value_chain(
        &self,
        issue: &IssueClassification,
    ) -> Result<ValueChain, TokenwiseError> {
        self.value_chain.generate_value_chain(issue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn economics_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Economics>();
    }

    #[test]
    fn invalid_config_tables_are_rejected() {
        let mut config = TokenwiseConfig::default();
        config.value_chain.productivity_loss.major = 3.0;
        let err = Economics::from_config(&config).unwrap_err();
        assert!(matches!(err, TokenwiseError::InvalidInput { .. }));

        let mut config = TokenwiseConfig::default();
        config.pricing.default_preset = "missing".to_string();
        let err = Economics::from_config(&config).unwrap_err();
        assert!(matches!(err, TokenwiseError::UnknownPreset { .. }));
    }

    #[test]
    fn default_and_default_config_agree() {
        let from_config = Economics::from_config(&TokenwiseConfig::default()).unwrap();
        let default = Economics::default();
        let a = from_config.calculate_monthly_cost(12_345, None).unwrap();
        let b = default.calculate_monthly_cost(12_345, None).unwrap();
        assert_eq!(a, b);
    }
}
