// SPDX-FileCopyrightText: 2026 Tokenwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Value chains: from a classified issue to productivity and business impact.
//!
//! Productivity loss comes from a severity-keyed table; opportunity cost is
//! that loss applied to a baseline monthly value. With the default
//! [`CountScaling::Independent`] policy the occurrence count does not enter
//! the cost, so five critical fragmentation issues cost the same as one.

use tokenwise_config::model::{CountScaling, SeverityTable, ValueChainConfig};
use tokenwise_core::{
    BusinessOutcome, DeveloperImpact, IssueClassification, TokenwiseError, ValueChain,
};
use tracing::debug;

/// Generates value chains from classified issues.
#[derive(Debug, Clone)]
pub struct ValueChainGenerator {
    baseline_monthly_value: f64,
    productivity_loss: SeverityTable,
    count_scaling: CountScaling,
}

impl ValueChainGenerator {
    /// Create a generator with explicit tables.
    pub fn new(
        baseline_monthly_value: f64,
        productivity_loss: SeverityTable,
        count_scaling: CountScaling,
    ) -> Result<Self, TokenwiseError> {
        if !baseline_monthly_value.is_finite() || baseline_monthly_value < 0.0 {
            return Err(TokenwiseError::invalid_input(
                "baselineMonthlyValue",
                format!("must be non-negative, got {baseline_monthly_value}"),
            ));
        }
        for (severity, loss) in [
            ("minor", productivity_loss.minor),
            ("major", productivity_loss.major),
            ("critical", productivity_loss.critical),
        ] {
            if !(0.0..=1.0).contains(&loss) {
                return Err(TokenwiseError::invalid_input(
                    format!("productivityLoss.{severity}"),
                    format!("must be in [0, 1], got {loss}"),
                ));
            }
        }
        Ok(Self {
            baseline_monthly_value,
            productivity_loss,
            count_scaling,
        })
    }

    /// Build from the `[value_chain]` config section.
    pub fn from_config(config: &ValueChainConfig) -> Result<Self, TokenwiseError> {
        Self::new(
            config.baseline_monthly_value,
            config.productivity_loss,
            config.count_scaling,
        )
    }

    /// Generate the value chain for one classified issue.
    pub fn generate_value_chain(
        &self,
        issue: &IssueClassification,
    ) -> Result<ValueChain, TokenwiseError> {
        if issue.count == 0 {
            return Err(TokenwiseError::invalid_input(
                "count",
                "must be positive, got 0",
            ));
        }

        let productivity_loss = self.productivity_loss.get(issue.severity);
        let multiplier = match self.count_scaling {
            CountScaling::Independent => 1.0,
            CountScaling::Linear => f64::from(issue.count),
        };
        let opportunity_cost = productivity_loss * self.baseline_monthly_value * multiplier;

        debug!(
            issue_type = %issue.issue_type,
            severity = %issue.severity,
            count = issue.count,
            productivity_loss,
            opportunity_cost,
            "generated value chain"
        );

        Ok(ValueChain {
            developer_impact: DeveloperImpact { productivity_loss },
            business_outcome: BusinessOutcome {
                risk_level: issue.severity,
                opportunity_cost,
            },
        })
    }
}

impl Default for ValueChainGenerator {
    fn default() -> Self {
        let config = ValueChainConfig::default();
        Self {
            baseline_monthly_value: config.baseline_monthly_value,
            productivity_loss: config.productivity_loss,
            count_scaling: config.count_scaling,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokenwise_core::{IssueType, Severity};

    fn issue(count: u32, severity: Severity) -> IssueClassification {
        IssueClassification {
            issue_type: IssueType::ContextFragmentation,
            count,
            severity,
        }
    }

    #[test]
    fn critical_fragmentation_reference_chain() {
        let chain = ValueChainGenerator::default()
            .generate_value_chain(&issue(5, Severity::Critical))
            .unwrap();
        assert!((chain.developer_impact.productivity_loss - 0.25).abs() < f64::EPSILON);
        assert_eq!(chain.business_outcome.risk_level, Severity::Critical);
        assert!((chain.business_outcome.opportunity_cost - 3750.0).abs() < 1e-9);
    }

    #[test]
    fn default_policy_ignores_count() {
        let generator = ValueChainGenerator::default();
        let one = generator.generate_value_chain(&issue(1, Severity::Major)).unwrap();
        let many = generator.generate_value_chain(&issue(40, Severity::Major)).unwrap();
        assert_eq!(one, many);
    }

    #[test]
    fn linear_policy_scales_cost_but_not_loss() {
        let generator =
            ValueChainGenerator::new(15_000.0, SeverityTable::default(), CountScaling::Linear)
                .unwrap();
        let chain = generator.generate_value_chain(&issue(5, Severity::Critical)).unwrap();
        assert!((chain.developer_impact.productivity_loss - 0.25).abs() < f64::EPSILON);
        assert!((chain.business_outcome.opportunity_cost - 18_750.0).abs() < 1e-9);
    }

    #[test]
    fn severities_map_to_increasing_loss() {
        let generator = ValueChainGenerator::default();
        let minor = generator.generate_value_chain(&issue(1, Severity::Minor)).unwrap();
        let major = generator.generate_value_chain(&issue(1, Severity::Major)).unwrap();
        assert!((minor.developer_impact.productivity_loss - 0.05).abs() < f64::EPSILON);
        assert!((major.developer_impact.productivity_loss - 0.15).abs() < f64::EPSILON);
        assert!((minor.business_outcome.opportunity_cost - 750.0).abs() < 1e-9);
        assert!((major.business_outcome.opportunity_cost - 2250.0).abs() < 1e-9);
        assert_eq!(minor.business_outcome.risk_level, Severity::Minor);
    }

    #[test]
    fn zero_count_is_invalid_input() {
        let err = ValueChainGenerator::default()
            .generate_value_chain(&issue(0, Severity::Minor))
            .unwrap_err();
        assert!(matches!(err, TokenwiseError::InvalidInput { ref field, .. } if field == "count"));
    }

    #[test]
    fn constructor_rejects_bad_tables() {
        let table = SeverityTable {
            minor: 0.1,
            major: 0.2,
            critical: 1.2,
        };
        assert!(ValueChainGenerator::new(15_000.0, table, CountScaling::Independent).is_err());
        assert!(
            ValueChainGenerator::new(-1.0, SeverityTable::default(), CountScaling::Independent)
                .is_err()
        );
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let chain = ValueChainGenerator::default()
            .generate_value_chain(&issue(5, Severity::Critical))
            .unwrap();
        let json = serde_json::to_value(chain).unwrap();
        assert_eq!(json["developerImpact"]["productivityLoss"], 0.25);
        assert_eq!(json["businessOutcome"]["riskLevel"], "critical");
        assert_eq!(json["businessOutcome"]["opportunityCost"], 3750.0);
    }
}
