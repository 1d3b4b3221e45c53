// SPDX-FileCopyrightText: 2026 Tokenwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model pricing registry.
//!
//! Maps a model identifier to its price per 1000 tokens and the baseline
//! confidence attached to estimates priced with it. The registry is built
//! once from configuration and never changes afterwards.
//!
//! Built-in presets (price per 1K tokens, baseline confidence):
//!
//! | preset          | price    | confidence |
//! |-----------------|----------|------------|
//! | `gpt-4o`        | 0.005    | 0.85       |
//! | `gpt-4o-mini`   | 0.00015  | 0.80       |
//! | `gpt-5.3`       | 0.002    | 0.85       |
//! | `claude-haiku`  | 0.0008   | 0.80       |
//! | `claude-sonnet` | 0.003    | 0.85       |
//! | `claude-opus`   | 0.015    | 0.85       |
//!
//! `gpt-4o` is the default preset.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use tokenwise_config::model::{preset_key, PricingConfig};
use tokenwise_core::{ModelPricingPreset, TokenwiseError};
use tracing::warn;

static BUILTIN: LazyLock<PricingRegistry> =
    LazyLock::new(|| PricingRegistry::from_trusted(&PricingConfig::default()));

/// Immutable table of pricing presets with one designated default.
#[derive(Debug, Clone)]
pub struct PricingRegistry {
    /// Presets keyed by lowercased name.
    presets: BTreeMap<String, ModelPricingPreset>,
    /// Key of the default preset; always present in `presets`.
    default_key: String,
}

impl PricingRegistry {
    /// Build a registry from explicit presets.
    ///
    /// Every preset is validated, names must be unique ignoring case, and
    /// `default_preset` must be one of them.
    pub fn new(
        presets: impl IntoIterator<Item = ModelPricingPreset>,
        default_preset: &str,
    ) -> Result<Self, TokenwiseError> {
        let mut table: BTreeMap<String, ModelPricingPreset> = BTreeMap::new();
        for preset in presets {
            preset.validate()?;
            let key = preset_key(&preset.name);
            if let Some(existing) = table.get(&key) {
                return Err(TokenwiseError::invalid_input(
                    format!("presets.{}", preset.name),
                    format!("collides with preset `{}`", existing.name),
                ));
            }
            table.insert(key, preset);
        }

        let default_key = preset_key(default_preset);
        if !table.contains_key(&default_key) {
            return Err(TokenwiseError::UnknownPreset {
                name: default_preset.to_string(),
                available: join_names(&table),
            });
        }

        Ok(Self {
            presets: table,
            default_key,
        })
    }

    /// Build a registry from the `[pricing]` config section.
    pub fn from_config(config: &PricingConfig) -> Result<Self, TokenwiseError> {
        Self::new(config.to_presets(), &config.default_preset)
    }

    /// Build from a table known to be valid (the compiled-in defaults).
    fn from_trusted(config: &PricingConfig) -> Self {
        let presets: BTreeMap<String, ModelPricingPreset> = config
            .to_presets()
            .into_iter()
            .map(|preset| (preset_key(&preset.name), preset))
            .collect();
        Self {
            presets,
            default_key: preset_key(&config.default_preset),
        }
    }

    /// The process-wide registry holding the built-in presets.
    pub fn builtin() -> &'static PricingRegistry {
        &BUILTIN
    }

    /// Look up a preset by name (case-insensitive).
    ///
    /// Returns `TokenwiseError::UnknownPreset` for unregistered names.
    pub fn lookup(&self, name: &str) -> Result<&ModelPricingPreset, TokenwiseError> {
        self.presets
            .get(&preset_key(name))
            .ok_or_else(|| TokenwiseError::UnknownPreset {
                name: name.to_string(),
                available: join_names(&self.presets),
            })
    }

    /// Look up a preset, falling back to the default for `None` or unknown names.
    /// Unknown names are logged at warn level.
    pub fn lookup_or_default(&self, name: Option<&str>) -> &ModelPricingPreset {
        match name {
            None => self.default_preset(),
            Some(name) => match self.lookup(name) {
                Ok(preset) => preset,
                Err(_) => {
                    let fallback = self.default_preset();
                    warn!(
                        requested = name,
                        fallback = %fallback.name,
                        "unknown pricing preset, using default"
                    );
                    fallback
                }
            },
        }
    }

    /// The default preset.
    pub fn default_preset(&self) -> &ModelPricingPreset {
        // Invariant established by every constructor.
        &self.presets[&self.default_key]
    }

    /// All presets, sorted by name.
    pub fn presets(&self) -> impl Iterator<Item = &ModelPricingPreset> {
        self.presets.values()
    }
}

impl Default for PricingRegistry {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

/// Look up a preset in the built-in registry.
pub fn lookup_pricing_preset(name: &str) -> Result<ModelPricingPreset, TokenwiseError> {
    PricingRegistry::builtin().lookup(name).cloned()
}

fn join_names(presets: &BTreeMap<String, ModelPricingPreset>) -> String {
    presets
        .values()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
