// SPDX-FileCopyrightText: 2026 Tokenwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tokenwise - unit economics for code-quality signals.
//!
//! This is the binary entry point. Every subcommand prints one JSON document
//! on stdout; logs go to stderr.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;
use tokenwise_config::TokenwiseConfig;
use tokenwise_core::{IssueType, Severity, TokenwiseError};
use tokenwise_cost::Economics;
use tracing_subscriber::EnvFilter;

use commands::UsageArgs;

/// Tokenwise - unit economics for code-quality signals.
#[derive(Parser, Debug)]
#[command(name = "tokenwise", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List pricing presets, or show one by name.
    Presets {
        /// Preset to show (case-insensitive).
        name: Option<String>,
    },
    /// Compute a token budget from a waste breakdown.
    Budget {
        /// Total tokens consumed per query.
        #[arg(long, allow_negative_numbers = true)]
        total_tokens: i64,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        duplication: i64,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        fragmentation: i64,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        chattiness: i64,
        /// Also price the wasted tokens with this preset.
        #[arg(long)]
        preset: Option<String>,
        #[command(flatten)]
        usage: UsageArgs,
    },
    /// Estimate the monthly cost of a per-query token count.
    Cost {
        /// Tokens per query.
        #[arg(long)]
        tokens: u64,
        /// Pricing preset (falls back to the configured default when unknown).
        #[arg(long)]
        preset: Option<String>,
        #[command(flatten)]
        usage: UsageArgs,
    },
    /// Predict the AI suggestion acceptance rate from analyzer output.
    Acceptance {
        /// JSON object of tool name to scoring output, or `-` for stdin.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
    },
    /// Map a classified issue to developer impact and business outcome.
    ValueChain {
        #[arg(long)]
        issue_type: IssueType,
        #[arg(long, default_value_t = 1)]
        count: u32,
        #[arg(long)]
        severity: Severity,
    },
}

fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => tokenwise_config::load_and_validate_path(path),
        None => tokenwise_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            tokenwise_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log.level);

    match run(&config, cli.command) {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        },
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn run(config: &TokenwiseConfig, command: Commands) -> Result<Value, TokenwiseError> {
    let economics = Economics::from_config(config)?;

    match command {
        Commands::Presets { name } => commands::presets(&economics, name.as_deref()),
        Commands::Budget {
            total_tokens,
            duplication,
            fragmentation,
            chattiness,
            preset,
            usage,
        } => commands::budget(
            &economics,
            total_tokens,
            [duplication, fragmentation, chattiness],
            preset.as_deref(),
            &usage,
        ),
        Commands::Cost {
            tokens,
            preset,
            usage,
        } => commands::cost(&economics, tokens, preset.as_deref(), &usage),
        Commands::Acceptance { input } => commands::acceptance(&economics, &input),
        Commands::ValueChain {
            issue_type,
            count,
            severity,
        } => commands::value_chain(&economics, issue_type, count, severity),
    }
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tokenwise={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
