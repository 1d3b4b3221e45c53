// SPDX-FileCopyrightText: 2026 Tokenwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the tokenwise configuration system.

use std::path::Path;

use tokenwise_config::diagnostic::ConfigError;
use tokenwise_config::model::{CountScaling, TokenwiseConfig};
use tokenwise_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

/// Valid TOML with all known sections deserializes successfully.
#[test]
fn valid_toml_deserializes_into_tokenwise_config() {
    let toml = r#"
[log]
level = "debug"

[pricing]
default_preset = "gpt-5.3"

[pricing.presets.local-llama]
price_per_1k_tokens = 0.0001
baseline_confidence = 0.6

[usage]
developer_count = 12
queries_per_dev_per_day = 80
days_per_month = 22

[acceptance]
base_rate = 0.35
neutral_score = 60.0

[acceptance.tool_weights]
"pattern-detect" = 0.25
"testability" = 0.15

[value_chain]
baseline_monthly_value = 20000.0
count_scaling = "linear"

[value_chain.productivity_loss]
minor = 0.02
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.log.level, "debug");
    assert_eq!(config.pricing.default_preset, "gpt-5.3");
    assert_eq!(config.usage.developer_count, 12);
    assert_eq!(config.usage.queries_per_dev_per_day, 80);
    assert_eq!(config.usage.days_per_month, 22);
    assert!((config.acceptance.base_rate - 0.35).abs() < f64::EPSILON);
    assert!((config.acceptance.neutral_score - 60.0).abs() < f64::EPSILON);
    assert!((config.value_chain.baseline_monthly_value - 20_000.0).abs() < f64::EPSILON);
    assert_eq!(config.value_chain.count_scaling, CountScaling::Linear);
    assert!((config.value_chain.productivity_loss.minor - 0.02).abs() < f64::EPSILON);
    // Untouched table entries keep their defaults.
    assert!((config.value_chain.productivity_loss.critical - 0.25).abs() < f64::EPSILON);
}

/// Preset and weight tables from TOML merge over the built-in tables.
#[test]
fn toml_tables_merge_with_builtin_tables() {
    let toml = r#"
[pricing.presets.local-llama]
price_per_1k_tokens = 0.0001

[acceptance.tool_weights]
"pattern-detect" = 0.25
"testability" = 0.15
"#;

    let config = load_config_from_str(toml).expect("should merge tables");
    assert!(config.pricing.presets.contains_key("local-llama"));
    assert!(config.pricing.presets.contains_key("gpt-4o"));
    assert!(config.pricing.presets.contains_key("gpt-5.3"));

    let weights = &config.acceptance.tool_weights;
    assert!((weights["pattern-detect"] - 0.25).abs() < f64::EPSILON);
    assert!((weights["testability"] - 0.15).abs() < f64::EPSILON);
    assert!((weights["context-analyzer"] - 0.4).abs() < f64::EPSILON);
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.log.level, "info");
    assert_eq!(config.pricing.default_preset, "gpt-4o");
    assert_eq!(config.usage.developer_count, 5);
    assert_eq!(config.usage.queries_per_dev_per_day, 50);
    assert_eq!(config.usage.days_per_month, 30);
    assert!((config.acceptance.base_rate - 0.3).abs() < f64::EPSILON);
    assert!((config.acceptance.neutral_score - 50.0).abs() < f64::EPSILON);
    assert!((config.value_chain.baseline_monthly_value - 15_000.0).abs() < f64::EPSILON);
    assert_eq!(config.value_chain.count_scaling, CountScaling::Independent);
}

/// Unknown field in [usage] section produces an unknown field error.
#[test]
fn unknown_field_in_usage_produces_error() {
    let toml = r#"
[usage]
developer_cont = 4
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("developer_cont"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unexpected top-level section is rejected by deny_unknown_fields.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[metrics]
enabled = true
"#;

    let err = load_config_from_str(toml).expect_err("unknown top-level section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("metrics"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// Figment dotted overrides land on the right nested key.
#[test]
fn dotted_override_sets_nested_value() {
    use figment::{
        providers::{Format, Serialized, Toml},
        Figment,
    };

    let config: TokenwiseConfig = Figment::new()
        .merge(Serialized::defaults(TokenwiseConfig::default()))
        .merge(Toml::string("[usage]\ndeveloper_count = 3\n"))
        .merge(("usage.developer_count", 9))
        .extract()
        .expect("should merge override");

    assert_eq!(config.usage.developer_count, 9);
}

/// TOKENWISE_* environment variables override files in the standard hierarchy.
#[test]
fn env_vars_override_local_file() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "tokenwise.toml",
            r#"
[usage]
developer_count = 3

[pricing]
default_preset = "gpt-5.3"
"#,
        )?;
        jail.set_env("TOKENWISE_USAGE_DEVELOPER_COUNT", "11");
        jail.set_env("TOKENWISE_VALUE_CHAIN_BASELINE_MONTHLY_VALUE", "9000");

        let config = tokenwise_config::load_config()?;
        assert_eq!(config.usage.developer_count, 11);
        assert_eq!(config.pricing.default_preset, "gpt-5.3");
        assert!((config.value_chain.baseline_monthly_value - 9000.0).abs() < f64::EPSILON);
        Ok(())
    });
}

/// Missing config files are silently skipped (Figment's Toml::file() behavior).
#[test]
fn missing_config_files_silently_skipped() {
    use figment::{
        providers::{Format, Serialized, Toml},
        Figment,
    };

    let config: TokenwiseConfig = Figment::new()
        .merge(Serialized::defaults(TokenwiseConfig::default()))
        .merge(Toml::file("/nonexistent/path/tokenwise.toml"))
        .extract()
        .expect("missing file should be silently skipped");

    assert_eq!(config.pricing.default_preset, "gpt-4o");
}

/// Error output from load_and_validate_str includes the unknown key and a suggestion.
#[test]
fn diagnostic_error_includes_unknown_key_and_suggestion() {
    let toml = r#"
[usage]
developer_cont = 4
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let has_unknown_key = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "developer_cont"
                && suggestion.as_deref() == Some("developer_count")
                && valid_keys.contains("days_per_month")
        })
    });
    assert!(
        has_unknown_key,
        "should have UnknownKey error for 'developer_cont', got: {errors:?}"
    );
}

/// Invalid type (string where number expected) produces an InvalidType diagnostic.
#[test]
fn diagnostic_invalid_type_names_the_dotted_key() {
    let toml = r#"
[usage]
days_per_month = "thirty"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject invalid type");
    let has_invalid_type = errors.iter().any(|e| {
        matches!(e, ConfigError::InvalidType { key, .. } if key.contains("days_per_month"))
    });
    assert!(has_invalid_type, "expected InvalidType for usage.days_per_month, got: {errors:?}");
}

/// ConfigError can be rendered using miette's graphical handler.
#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::UnknownKey {
        key: "developer_cont".to_string(),
        suggestion: Some("developer_count".to_string()),
        valid_keys: "developer_count, queries_per_dev_per_day, days_per_month".to_string(),
        span: None,
        src: None,
    };

    assert!(error.code().is_some(), "should have diagnostic code");
    let help = error.help().expect("should have help text").to_string();
    assert!(
        help.contains("did you mean `developer_count`"),
        "help should contain suggestion, got: {help}"
    );

    let handler = GraphicalReportHandler::new();
    let mut buf = String::new();
    handler
        .render_report(&mut buf, &error)
        .expect("should render without error");
    assert!(buf.contains("developer_cont"), "rendered report should mention the key");
}

/// Validation runs after a successful load and rejects an unknown default preset.
#[test]
fn validation_catches_unregistered_default_preset() {
    let toml = r#"
[pricing]
default_preset = "gpt-9"
"#;

    let errors = load_and_validate_str(toml).expect_err("unknown preset should fail");
    assert!(errors.iter().any(|e| {
        matches!(e, ConfigError::Validation { message } if message.contains("gpt-9"))
    }));
}

/// The default preset is matched the same way the registry matches names.
#[test]
fn default_preset_is_case_insensitive() {
    let toml = r#"
[pricing]
default_preset = "GPT-4o"
"#;

    let config = load_and_validate_str(toml).expect("mixed-case default should validate");
    assert_eq!(config.pricing.default_preset, "GPT-4o");
}

/// A TOML preset whose name differs from a built-in only by case is rejected
/// instead of being shadowed by the built-in entry.
#[test]
fn case_colliding_preset_is_rejected() {
    let toml = r#"
[pricing.presets.GPT-4o]
price_per_1k_tokens = 0.05
"#;

    let errors = load_and_validate_str(toml).expect_err("colliding preset should fail");
    assert!(errors.iter().any(|e| {
        matches!(e, ConfigError::Validation { message }
            if message.contains("GPT-4o") && message.contains("case-insensitive"))
    }));
}

/// Overriding a built-in preset under its canonical name takes effect.
#[test]
fn builtin_preset_can_be_overridden() {
    let toml = r#"
[pricing.presets.gpt-4o]
price_per_1k_tokens = 0.05
"#;

    let config = load_and_validate_str(toml).expect("override should validate");
    let preset = &config.pricing.presets["gpt-4o"];
    assert!((preset.price_per_1k_tokens - 0.05).abs() < f64::EPSILON);
}

/// A preset added in TOML can become the default.
#[test]
fn custom_preset_can_be_default() {
    let toml = r#"
[pricing]
default_preset = "local-llama"

[pricing.presets.local-llama]
price_per_1k_tokens = 0.0001
baseline_confidence = 0.6
"#;

    let config = load_and_validate_str(toml).expect("custom default should validate");
    assert_eq!(config.pricing.default_preset, "local-llama");
}

/// load_and_validate_path reads an explicit file.
#[test]
fn load_and_validate_path_reads_file() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("team.toml", "[usage]\nqueries_per_dev_per_day = 120\n")?;

        let config = load_and_validate_path(Path::new("team.toml"))
            .expect("file config should validate");
        assert_eq!(config.usage.queries_per_dev_per_day, 120);
        Ok(())
    });
}

/// load_and_validate_path surfaces validation errors from the file.
#[test]
fn load_and_validate_path_reports_validation_errors() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("team.toml", "[usage]\ndeveloper_count = 0\n")?;

        let errors = load_and_validate_path(Path::new("team.toml"))
            .expect_err("zero developers should fail");
        assert!(errors.iter().any(|e| {
            matches!(e, ConfigError::Validation { message } if message.contains("developer_count"))
        }));
        Ok(())
    });
}
