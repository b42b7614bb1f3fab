// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Vaultgate configuration system.

use figment::Jail;
use serial_test::serial;
use vaultgate_config::diagnostic::ConfigError;
use vaultgate_config::{
    load_and_validate_path, load_and_validate_str, load_config, load_config_from_str,
    FailurePolicy, ResetPolicy, VaultgateConfig,
};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_vaultgate_config() {
    let toml = r#"
[app]
name = "authenticator"
log_level = "debug"

[bootstrap]
reset = true
timeout_secs = 5
failure_policy = "retry"
max_attempts = 4
retry_backoff_ms = 250
reset_policy = "halt_on_failure"

[preferences]
conceal_tokens_key = "hideCodes"

[assets]
root = "/opt/app/assets"
images = ["logo.png", "empty-state.png"]

[assets.fonts]
Inter = "fonts/Inter.ttf"

[device]
data_dir = "/var/lib/authenticator"
vault_file = "vault.db"
credential_file = "unlock.key"
preferences_file = "prefs.json"
biometric_marker = "bio"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.app.name, "authenticator");
    assert_eq!(config.app.log_level, "debug");
    assert!(config.bootstrap.reset);
    assert_eq!(config.bootstrap.timeout_secs, 5);
    assert_eq!(config.bootstrap.failure_policy, FailurePolicy::Retry);
    assert_eq!(config.bootstrap.max_attempts, 4);
    assert_eq!(config.bootstrap.retry_backoff_ms, 250);
    assert_eq!(config.bootstrap.reset_policy, ResetPolicy::HaltOnFailure);
    assert_eq!(config.preferences.conceal_tokens_key, "hideCodes");
    assert_eq!(config.assets.images, vec!["logo.png", "empty-state.png"]);
    assert_eq!(config.assets.fonts["Inter"], "fonts/Inter.ttf");
    assert_eq!(
        config.device.path(&config.device.credential_file),
        std::path::PathBuf::from("/var/lib/authenticator/unlock.key")
    );
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.app.name, "vaultgate");
    assert_eq!(config.app.log_level, "info");
    assert!(!config.bootstrap.reset);
    assert_eq!(config.bootstrap.timeout_secs, 30);
    assert_eq!(config.bootstrap.failure_policy, FailurePolicy::Abort);
    assert_eq!(config.bootstrap.reset_policy, ResetPolicy::ReportAndContinue);
    assert_eq!(config.preferences.conceal_tokens_key, "concealTokens");
    assert!(config.assets.images.is_empty());
    assert!(config.assets.fonts.is_empty());
    assert_eq!(config.device.vault_file, "vault.json");
}

/// Unknown field in [bootstrap] produces an unknown-field error.
#[test]
fn unknown_field_in_bootstrap_produces_error() {
    let toml = r#"
[bootstrap]
rest = true
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("rest"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unexpected top-level section is rejected by deny_unknown_fields.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[telemetry]
enabled = true
"#;

    assert!(load_config_from_str(toml).is_err());
}

/// The diagnostic path suggests the closest key.
#[test]
fn unknown_key_diagnostic_suggests_correction() {
    let toml = r#"
[bootstrap]
timout_secs = 10
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail");
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::UnknownKey { key, suggestion: Some(s), .. }
            if key == "timout_secs" && s == "timeout_secs"
    )));
}

/// Wrong value type becomes an InvalidType diagnostic.
#[test]
fn wrong_type_produces_invalid_type() {
    let toml = r#"
[bootstrap]
reset = ["yes", "please"]
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail");
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::InvalidType { .. })));
}

/// Semantic validation runs after successful deserialization.
#[test]
fn validation_errors_surface_from_str_loader() {
    let toml = r#"
[bootstrap]
failure_policy = "retry"
max_attempts = 1
"#;

    let errors = load_and_validate_str(toml).expect_err("retry with one attempt is invalid");
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("max_attempts"))));
}

/// VAULTGATE_BOOTSTRAP_RESET drives the reset directive; underscores in field
/// names survive the env mapping.
#[test]
#[serial]
fn env_vars_override_file_values() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "vaultgate.toml",
            r#"
[bootstrap]
reset = false
timeout_secs = 60
"#,
        )?;
        jail.set_env("VAULTGATE_BOOTSTRAP_RESET", "true");
        jail.set_env("VAULTGATE_BOOTSTRAP_TIMEOUT_SECS", "5");
        jail.set_env("VAULTGATE_PREFERENCES_CONCEAL_TOKENS_KEY", "hide");

        let config: VaultgateConfig = load_config()?;
        assert!(config.bootstrap.reset);
        assert_eq!(config.bootstrap.timeout_secs, 5);
        assert_eq!(config.preferences.conceal_tokens_key, "hide");
        Ok(())
    });
}

/// Explicit config path is honored and validated.
#[test]
#[serial]
fn explicit_path_is_loaded() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "[app]\nname = \"from-file\"\n").expect("write config");

    let config = load_and_validate_path(&path).expect("valid file");
    assert_eq!(config.app.name, "from-file");
}

/// Missing explicit file silently falls back to defaults (Figment's Toml::file() behavior).
#[test]
#[serial]
fn missing_config_file_silently_skipped() {
    let config = load_and_validate_path(std::path::Path::new("/nonexistent/vaultgate.toml"))
        .expect("missing file should be skipped");
    assert_eq!(config.app.name, "vaultgate");
}
