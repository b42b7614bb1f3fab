// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Vaultgate bootstrap.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level Vaultgate configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VaultgateConfig {
    /// Application identity and logging.
    #[serde(default)]
    pub app: AppConfig,

    /// Bootstrap behavior: reset directive, timeouts, recovery policy.
    #[serde(default)]
    pub bootstrap: BootstrapConfig,

    /// Preference keys read during bootstrap.
    #[serde(default)]
    pub preferences: PreferencesConfig,

    /// Images and fonts preloaded before the first screen.
    #[serde(default)]
    pub assets: AssetsConfig,

    /// On-device file locations used by the device adapters.
    #[serde(default)]
    pub device: DeviceConfig,
}

/// Application identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Display name of the application.
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_app_name() -> String {
    "vaultgate".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// What the orchestrator does once an attempt has failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// The first failed attempt is terminal.
    #[default]
    Abort,
    /// Re-run all loads until `max_attempts` is exhausted.
    Retry,
}

/// What the bootstrap does when a reset step fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    /// Record the failed steps in the outcome and keep bootstrapping.
    #[default]
    ReportAndContinue,
    /// Fail the bootstrap without running any load.
    HaltOnFailure,
}

/// Bootstrap configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BootstrapConfig {
    /// Wipe vault, credential, and preferences before bootstrapping.
    #[serde(default)]
    pub reset: bool,

    /// Upper bound for each bootstrap load, in seconds. `0` disables the bound.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Recovery policy after a failed attempt.
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Total attempts allowed under the `retry` policy (including the first).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay between attempts under the `retry` policy, in milliseconds.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Behavior when a reset step fails.
    #[serde(default)]
    pub reset_policy: ResetPolicy,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            reset: false,
            timeout_secs: default_timeout_secs(),
            failure_policy: FailurePolicy::default(),
            max_attempts: default_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
            reset_policy: ResetPolicy::default(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    500
}

/// Preference store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PreferencesConfig {
    /// Key holding the conceal-tokens preference. Presence of any value means enabled.
    #[serde(default = "default_conceal_tokens_key")]
    pub conceal_tokens_key: String,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            conceal_tokens_key: default_conceal_tokens_key(),
        }
    }
}

fn default_conceal_tokens_key() -> String {
    "concealTokens".to_string()
}

/// Asset preload configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AssetsConfig {
    /// Directory that image and font references are resolved against.
    #[serde(default = "default_assets_root")]
    pub root: String,

    /// Image resources to preload.
    #[serde(default)]
    pub images: Vec<String>,

    /// Font family name to font file.
    #[serde(default)]
    pub fonts: BTreeMap<String, String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            root: default_assets_root(),
            images: Vec::new(),
            fonts: BTreeMap::new(),
        }
    }
}

fn default_assets_root() -> String {
    "assets".to_string()
}

/// On-device storage locations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceConfig {
    /// Directory holding all device state files.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Vault file name. Only its existence is inspected.
    #[serde(default = "default_vault_file")]
    pub vault_file: String,

    /// Secure credential file name.
    #[serde(default = "default_credential_file")]
    pub credential_file: String,

    /// Preference store file name (JSON object).
    #[serde(default = "default_preferences_file")]
    pub preferences_file: String,

    /// Marker file whose presence means biometrics are enrolled.
    #[serde(default = "default_biometric_marker")]
    pub biometric_marker: String,
}

impl DeviceConfig {
    /// Resolve a file name against `data_dir`.
    pub fn path(&self, file: &str) -> PathBuf {
        PathBuf::from(&self.data_dir).join(file)
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            vault_file: default_vault_file(),
            credential_file: default_credential_file(),
            preferences_file: default_preferences_file(),
            biometric_marker: default_biometric_marker(),
        }
    }
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|d| d.join("vaultgate").display().to_string())
        .unwrap_or_else(|| ".vaultgate".to_string())
}

fn default_vault_file() -> String {
    "vault.json".to_string()
}

fn default_credential_file() -> String {
    "credential".to_string()
}

fn default_preferences_file() -> String {
    "preferences.json".to_string()
}

fn default_biometric_marker() -> String {
    "biometrics.enrolled".to_string()
}
