// SPDX-FileCopyrightText: 2026 Tokenwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the tokenwise unit-economics engine.

use thiserror::Error;

/// The primary error type returned by every engine operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TokenwiseError {
    /// An input value is outside its valid domain (zero where a positive
    /// value is required, out-of-range score, non-finite number).
    #[error("invalid input for `{field}`: {message}")]
    InvalidInput { field: String, message: String },

    /// The requested pricing preset is not registered.
    #[error("unknown pricing preset `{name}` (available: {available})")]
    UnknownPreset { name: String, available: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TokenwiseError {
    /// Shorthand for building an [`TokenwiseError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}
