// SPDX-FileCopyrightText: 2026 Tokenwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Token budget calculation.
//!
//! Reduces the per-category waste reported by upstream analyzers plus the
//! total context size into a normalized [`TokenBudget`]. Waste larger than
//! the context is accepted (analyzers may double-count across categories);
//! the efficiency ratio is clamped instead.

use tokenwise_core::{TokenBudget, TokenwiseError, WastedTokenBreakdown, WastedTokens};
use tracing::debug;

/// Share of wasted tokens a refactor can realistically recover.
pub const RECOVERY_FACTOR: f64 = 0.8;

/// Compute the token budget for one analysis run.
///
/// A zero-token context has nothing to waste, so its efficiency is `1.0`.
pub fn compute_budget(total_context_tokens: u64, wasted: WastedTokenBreakdown) -> TokenBudget {
    let wasted_tokens = WastedTokens::from(wasted);

    let efficiency_ratio = if total_context_tokens == 0 {
        1.0
    } else {
        let total = total_context_tokens as f64;
        ((total - wasted_tokens.total as f64) / total).clamp(0.0, 1.0)
    };

    let potential_retrievable_tokens = (wasted_tokens.total as f64 * RECOVERY_FACTOR).round() as u64;

    debug!(
        total_context_tokens,
        wasted = wasted_tokens.total,
        efficiency_ratio,
        potential_retrievable_tokens,
        "computed token budget"
    );

    TokenBudget {
        total_context_tokens,
        wasted_tokens,
        efficiency_ratio,
        potential_retrievable_tokens,
    }
}

/// Compute a budget from signed counts, as some analyzers emit them.
///
/// Returns `TokenwiseError::InvalidInput` naming the first negative field.
pub fn try_compute_budget(
    total_context_tokens: i64,
    duplication: i64,
    fragmentation: i64,
    chattiness: i64,
) -> Result<TokenBudget, TokenwiseError> {
    let total_context_tokens = non_negative("totalContextTokens", total_context_tokens)?;
    let wasted = WastedTokenBreakdown {
        duplication: non_negative("duplication", duplication)?,
        fragmentation: non_negative("fragmentation", fragmentation)?,
        chattiness: non_negative("chattiness", chattiness)?,
    };
    Ok(compute_budget(total_context_tokens, wasted))
}

fn non_negative(field: &str, value: i64) -> Result<u64, TokenwiseError> {
    u64::try_from(value).map_err(|_| {
        TokenwiseError::invalid_input(field, format!("must be non-negative, got {value}"))
    })
}
