// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./vaultgate.toml` > `~/.config/vaultgate/vaultgate.toml` >
//! `/etc/vaultgate/vaultgate.toml` with environment variable overrides via `VAULTGATE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::VaultgateConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/vaultgate/vaultgate.toml";

/// Local configuration file, relative to the working directory.
pub const LOCAL_CONFIG_FILE: &str = "vaultgate.toml";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/vaultgate/vaultgate.toml` (system-wide)
/// 3. `~/.config/vaultgate/vaultgate.toml` (user XDG config)
/// 4. `./vaultgate.toml` (local directory)
/// 5. `VAULTGATE_*` environment variables
pub fn load_config() -> Result<VaultgateConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<VaultgateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VaultgateConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<VaultgateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VaultgateConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(VaultgateConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("vaultgate/vaultgate.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `VAULTGATE_BOOTSTRAP_TIMEOUT_SECS` must map to
/// `bootstrap.timeout_secs`, not `bootstrap.timeout.secs`.
fn env_provider() -> Env {
    Env::prefixed("VAULTGATE_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: VAULTGATE_BOOTSTRAP_RESET -> "bootstrap_reset"
        let key_str = key.as_str();
        let mapped = ["app", "bootstrap", "preferences", "assets", "device"]
            .iter()
            .find_map(|section| {
                key_str
                    .strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|field| format!("{section}.{field}"))
            })
            .unwrap_or_else(|| key_str.to_string());
        mapped.into()
    })
}
