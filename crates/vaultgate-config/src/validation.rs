// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as known log levels, non-empty paths, and a usable retry policy.

use crate::diagnostic::ConfigError;
use crate::model::{FailurePolicy, VaultgateConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &VaultgateConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut invalid = |message: String| errors.push(ConfigError::Validation { message });

    if !LOG_LEVELS.contains(&config.app.log_level.trim().to_ascii_lowercase().as_str()) {
        invalid(format!(
            "app.log_level `{}` must be one of {}",
            config.app.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    if config.bootstrap.failure_policy == FailurePolicy::Retry && config.bootstrap.max_attempts < 2
    {
        invalid(format!(
            "bootstrap.max_attempts must be at least 2 with failure_policy = \"retry\", got {}",
            config.bootstrap.max_attempts
        ));
    }

    if config.bootstrap.max_attempts == 0 {
        invalid("bootstrap.max_attempts must be at least 1".to_string());
    }

    if config.preferences.conceal_tokens_key.trim().is_empty() {
        invalid("preferences.conceal_tokens_key must not be empty".to_string());
    }

    for (i, image) in config.assets.images.iter().enumerate() {
        if image.trim().is_empty() {
            invalid(format!("assets.images[{i}] must not be empty"));
        }
    }

    for (family, file) in &config.assets.fonts {
        if family.trim().is_empty() {
            invalid("assets.fonts contains an empty font family name".to_string());
        }
        if file.trim().is_empty() {
            invalid(format!("assets.fonts.{family} must name a font file"));
        }
    }

    if config.device.data_dir.trim().is_empty() {
        invalid("device.data_dir must not be empty".to_string());
    }

    let device_files = [
        ("vault_file", &config.device.vault_file),
        ("credential_file", &config.device.credential_file),
        ("preferences_file", &config.device.preferences_file),
        ("biometric_marker", &config.device.biometric_marker),
    ];
    for (name, file) in device_files {
        if file.trim().is_empty() {
            invalid(format!("device.{name} must not be empty"));
        }
    }

    let mut seen: Vec<(&str, &str)> = Vec::new();
    for (name, file) in device_files {
        if let Some((other, _)) = seen.iter().find(|(_, f)| *f == file.as_str()) {
            invalid(format!(
                "device.{name} and device.{other} must not point at the same file `{file}`"
            ));
        }
        seen.push((name, file.as_str()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_message(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        let config = VaultgateConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = VaultgateConfig::default();
        config.app.log_level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "app.log_level"));
    }

    #[test]
    fn retry_needs_more_than_one_attempt() {
        let mut config = VaultgateConfig::default();
        config.bootstrap.failure_policy = FailurePolicy::Retry;
        config.bootstrap.max_attempts = 1;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "max_attempts"));
    }

    #[test]
    fn abort_allows_single_attempt() {
        let mut config = VaultgateConfig::default();
        config.bootstrap.max_attempts = 1;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_conceal_key_fails_validation() {
        let mut config = VaultgateConfig::default();
        config.preferences.conceal_tokens_key = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "conceal_tokens_key"));
    }

    #[test]
    fn colliding_device_files_fail_validation() {
        let mut config = VaultgateConfig::default();
        config.device.credential_file = config.device.vault_file.clone();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "same file"));
    }

    #[test]
    fn collects_every_error() {
        let mut config = VaultgateConfig::default();
        config.app.log_level = "loud".to_string();
        config.device.data_dir = String::new();
        config.assets.fonts.insert("Inter".to_string(), String::new());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
