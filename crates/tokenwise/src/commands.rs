// SPDX-FileCopyrightText: 2026 Tokenwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations.
//!
//! Each command returns a JSON value so `main` owns all printing and the
//! commands stay testable without capturing stdout.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use serde_json::{json, Value};
use tokenwise_core::{
    IssueClassification, IssueType, Severity, ToolScoringOutput, TokenwiseError,
    UsageAssumptions,
};
use tokenwise_cost::{try_compute_budget, Economics};
use tracing::info;

/// Usage flags shared by the cost-producing commands.
#[derive(Debug, Clone, Copy, Default, clap::Args)]
pub struct UsageArgs {
    /// Developers sharing the codebase (overrides usage.developer_count).
    #[arg(long)]
    pub developers: Option<u32>,

    /// AI queries per developer per day (overrides usage.queries_per_dev_per_day).
    #[arg(long)]
    pub queries_per_day: Option<u32>,

    /// Billable days per month (overrides usage.days_per_month).
    #[arg(long)]
    pub days: Option<u32>,
}

impl UsageArgs {
    /// Apply the flags over the configured defaults.
    pub fn resolve(&self, defaults: &UsageAssumptions) -> Result<UsageAssumptions, TokenwiseError> {
        UsageAssumptions::new(
            self.developers.unwrap_or(defaults.developer_count),
            self.queries_per_day.unwrap_or(defaults.queries_per_dev_per_day),
            self.days.unwrap_or(defaults.days_per_month),
        )
    }
}

/// List every preset, or show one by name.
pub fn presets(economics: &Economics, name: Option<&str>) -> Result<Value, TokenwiseError> {
    match name {
        Some(name) => to_json(economics.lookup_pricing_preset(name)?),
        None => {
            let registry = economics.registry();
            Ok(json!({
                "default": registry.default_preset().name,
                "presets": registry.presets().collect::<Vec<_>>(),
            }))
        }
    }
}

/// Compute a token budget, optionally pricing its waste.
pub fn budget(
    economics: &Economics,
    total_context_tokens: i64,
    waste: [i64; 3],
    preset: Option<&str>,
    usage: &UsageArgs,
) -> Result<Value, TokenwiseError> {
    let [duplication, fragmentation, chattiness] = waste;
    let budget = try_compute_budget(total_context_tokens, duplication, fragmentation, chattiness)?;

    let Some(preset) = preset else {
        return to_json(&budget);
    };

    let estimator = economics.estimator();
    let usage = usage.resolve(estimator.default_usage())?;
    let preset = estimator.registry().lookup_or_default(Some(preset));
    let cost = economics.estimate_cost(&budget, preset, Some(&usage))?;
    info!(preset = %preset.name, total = cost.total, "priced token budget");

    Ok(json!({
        "budget": budget,
        "preset": preset.name,
        "cost": cost,
    }))
}

/// Estimate the monthly cost of a raw per-query token count.
pub fn cost(
    economics: &Economics,
    tokens: u64,
    preset: Option<&str>,
    usage: &UsageArgs,
) -> Result<Value, TokenwiseError> {
    let estimator = economics.estimator();
    let usage = usage.resolve(estimator.default_usage())?;
    let estimate = estimator.calculate_monthly_cost_with_preset(tokens, preset, Some(&usage))?;
    to_json(&estimate)
}

/// Predict the acceptance rate from a JSON map of tool outputs.
///
/// `input` is a file path, or `-` for stdin.
pub fn acceptance(economics: &Economics, input: &Path) -> Result<Value, TokenwiseError> {
    let raw = read_input(input)?;
    let outputs: BTreeMap<String, ToolScoringOutput> = serde_json::from_str(&raw)
        .map_err(|e| TokenwiseError::invalid_input("input", format!("malformed tool outputs: {e}")))?;
    to_json(&economics.predict_acceptance_rate(&outputs)?)
}

/// Generate the value chain for one classified issue.
pub fn value_chain(
    economics: &Economics,
    issue_type: IssueType,
    count: u32,
    severity: Severity,
) -> Result<Value, TokenwiseError> {
    let issue = IssueClassification {
        issue_type,
        count,
        severity,
    };
    to_json(&economics.generate_value_chain(&issue)?)
}

fn read_input(input: &Path) -> Result<String, TokenwiseError> {
    let unreadable =
        |e: std::io::Error| TokenwiseError::invalid_input("input", format!("cannot read {}: {e}", input.display()));

    if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map_err(unreadable)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input).map_err(unreadable)
    }
}

fn to_json(value: &impl Serialize) -> Result<Value, TokenwiseError> {
    serde_json::to_value(value).map_err(|e| TokenwiseError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_lists_default_and_all_entries() {
        let value = presets(&Economics::default(), None).unwrap();
        assert_eq!(value["default"], "gpt-4o");
        let names: Vec<&str> = value["presets"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert!(names.contains(&"gpt-5.3"));
    }

    #[test]
    fn presets_show_unknown_is_an_error() {
        let err = presets(&Economics::default(), Some("gpt-9")).unwrap_err();
        assert!(matches!(err, TokenwiseError::UnknownPreset { .. }));
    }

    #[test]
    fn budget_without_preset_is_plain_budget() {
        let value = budget(
            &Economics::default(),
            10_000,
            [1000, 500, 0],
            None,
            &UsageArgs::default(),
        )
        .unwrap();
        assert_eq!(value["wastedTokens"]["total"], 1500);
        assert_eq!(value["potentialRetrievableTokens"], 1200);
    }

    #[test]
    fn budget_with_preset_includes_cost() {
        let usage = UsageArgs {
            developers: Some(1),
            queries_per_day: Some(100),
            days: Some(30),
        };
        let value = budget(
            &Economics::default(),
            10_000,
            [1000, 0, 0],
            Some("gpt-5.3"),
            &usage,
        )
        .unwrap();
        assert_eq!(value["preset"], "gpt-5.3");
        let total = value["cost"]["total"].as_f64().unwrap();
        assert!((total - 6.0).abs() < 1e-9);
    }

    #[test]
    fn budget_rejects_negative_counts() {
        let err = budget(
            &Economics::default(),
            100,
            [-1, 0, 0],
            None,
            &UsageArgs::default(),
        )
        .unwrap_err();
        assert!(matches!(err, TokenwiseError::InvalidInput { .. }));
    }

    #[test]
    fn cost_applies_usage_overrides() {
        let usage = UsageArgs {
            developers: Some(1),
            queries_per_day: Some(100),
            days: Some(30),
        };
        let value = cost(&Economics::default(), 1000, None, &usage).unwrap();
        let total = value["total"].as_f64().unwrap();
        assert!((total - 15.0).abs() < 1e-9);
    }

    #[test]
    fn zero_developers_flag_is_invalid() {
        let usage = UsageArgs {
            developers: Some(0),
            ..UsageArgs::default()
        };
        let err = cost(&Economics::default(), 1000, None, &usage).unwrap_err();
        assert!(matches!(err, TokenwiseError::InvalidInput { .. }));
    }

    #[test]
    fn value_chain_reports_camel_case() {
        let value = value_chain(
            &Economics::default(),
            IssueType::ContextFragmentation,
            5,
            Severity::Critical,
        )
        .unwrap();
        assert_eq!(value["businessOutcome"]["riskLevel"], "critical");
        assert_eq!(value["businessOutcome"]["opportunityCost"], 3750.0);
    }

    #[test]
    fn acceptance_missing_file_is_invalid_input() {
        let err = acceptance(&Economics::default(), Path::new("/nonexistent/tools.json"))
            .unwrap_err();
        assert!(matches!(err, TokenwiseError::InvalidInput { ref field, .. } if field == "input"));
    }
}
