// SPDX-FileCopyrightText: 2026 Tokenwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the tokenwise unit-economics engine.
//!
//! This crate provides the error type and the value types shared by the
//! configuration layer, the engine components and the command-line host.

pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TokenwiseError;
pub use types::{
    AcceptanceFactor, AcceptancePrediction, BusinessOutcome, CostEstimate, DeveloperImpact,
    IssueClassification, IssueType, ModelPricingPreset, Severity, TokenBudget,
    ToolScoringOutput, UsageAssumptions, ValueChain, WastedTokenBreakdown, WastedTokens,
};
