// SPDX-FileCopyrightText: 2026 Tokenwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AI-suggestion acceptance-rate prediction.
//!
//! Starts from a base rate and shifts it by each weighted analyzer's score
//! deviation from the neutral score:
//! `contribution = weight * (score - neutral) / 100`. Analyzers without a
//! weight are skipped.

use std::collections::BTreeMap;

use tokenwise_config::model::AcceptanceConfig;
use tokenwise_core::{AcceptanceFactor, AcceptancePrediction, ToolScoringOutput, TokenwiseError};
use tracing::{debug, trace};

/// Predicts acceptance rates from per-tool quality scores.
#[derive(Debug, Clone)]
pub struct AcceptancePredictor {
    base_rate: f64,
    neutral_score: f64,
    weights: BTreeMap<String, f64>,
}

impl AcceptancePredictor {
    /// Create a predictor with an explicit weight table.
    pub fn new(
        base_rate: f64,
        neutral_score: f64,
        weights: BTreeMap<String, f64>,
    ) -> Result<Self, TokenwiseError> {
        if !(0.0..=1.0).contains(&base_rate) {
            return Err(TokenwiseError::invalid_input(
                "baseRate",
                format!("must be in [0, 1], got {base_rate}"),
            ));
        }
        if !(0.0..=100.0).contains(&neutral_score) {
            return Err(TokenwiseError::invalid_input(
                "neutralScore",
                format!("must be in [0, 100], got {neutral_score}"),
            ));
        }
        if let Some((tool, weight)) = weights.iter().find(|(_, w)| !w.is_finite() || **w < 0.0) {
            return Err(TokenwiseError::invalid_input(
                format!("toolWeights.{tool}"),
                format!("must be non-negative, got {weight}"),
            ));
        }
        Ok(Self {
            base_rate,
            neutral_score,
            weights,
        })
    }

    /// Build from the `[acceptance]` config section.
    pub fn from_config(config: &AcceptanceConfig) -> Result<Self, TokenwiseError> {
        Self::new(
            config.base_rate,
            config.neutral_score,
            config.tool_weights.clone(),
        )
    }

    /// Weight configured for `tool`, if any.
    pub fn weight(&self, tool: &str) -> Option<f64> {
        self.weights.get(tool).copied()
    }

    /// Predict the acceptance rate for a set of tool outputs keyed by tool name.
    ///
    /// Factors appear in tool-name order. Scores of weighted tools must lie in
    /// `[0, 100]`; unweighted tools are ignored entirely.
    pub fn predict_acceptance_rate(
        &self,
        tool_outputs: &BTreeMap<String, ToolScoringOutput>,
    ) -> Result<AcceptancePrediction, TokenwiseError> {
        let mut rate = self.base_rate;
        let mut factors = Vec::new();

        for (tool_name, output) in tool_outputs {
            let Some(weight) = self.weight(tool_name) else {
                trace!(tool = %tool_name, "no weight configured, ignoring tool");
                continue;
            };

            if !(0.0..=100.0).contains(&output.score) {
                return Err(TokenwiseError::invalid_input(
                    format!("{tool_name}.score"),
                    format!("must be in [0, 100], got {}", output.score),
                ));
            }

            let contribution = weight * (output.score - self.neutral_score) / 100.0;
            rate += contribution;
            factors.push(AcceptanceFactor {
                tool_name: tool_name.clone(),
                weight,
                contribution,
            });
        }

        let rate = rate.clamp(0.0, 1.0);
        debug!(rate, factors = factors.len(), "predicted acceptance rate");

        Ok(AcceptancePrediction { rate, factors })
    }
}

impl Default for AcceptancePredictor {
    fn default() -> Self {
        let config = AcceptanceConfig::default();
        Self {
            base_rate: config.base_rate,
            neutral_score: config.neutral_score,
            weights: config.tool_weights,
        }
    }
}
