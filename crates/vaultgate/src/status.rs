// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `vaultgate status` command implementation.
//!
//! Read-only view of the device state the bootstrap depends on. Never
//! removes anything and never prints the credential itself.

use serde::Serialize;
use vaultgate_config::VaultgateConfig;
use vaultgate_core::{
    BiometricEnrollment, CredentialStore, KeyValueStore, VaultExistence, VaultgateError,
};
use vaultgate_device::DeviceCollaborators;

use crate::OutputArgs;
use crate::output::{header, mark, print_json, yes_no};

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub data_dir: String,
    pub vault_present: bool,
    pub biometrics_enrolled: bool,
    pub credential_stored: bool,
    pub conceal_tokens: bool,
}

impl StatusReport {
    /// A stored credential without enrollment is what the reconciler purges.
    pub fn credential_is_stale(&self) -> bool {
        self.credential_stored && !self.biometrics_enrolled
    }
}

pub async fn collect_status(config: &VaultgateConfig) -> Result<StatusReport, VaultgateError> {
    let device = DeviceCollaborators::from_config(config);
    let (vault_present, biometrics_enrolled, credential, conceal) = tokio::join!(
        device.vault.exists(),
        device.enrollment.is_enrolled(),
        device.credentials.get(),
        device
            .preferences
            .get(&config.preferences.conceal_tokens_key),
    );
    Ok(StatusReport {
        data_dir: config.device.data_dir.clone(),
        vault_present: vault_present?,
        biometrics_enrolled: biometrics_enrolled?,
        credential_stored: credential?.is_some(),
        conceal_tokens: conceal?.is_some(),
    })
}

/// Run the `vaultgate status` command.
pub async fn run_status(config: &VaultgateConfig, output: OutputArgs) -> Result<bool, VaultgateError> {
    let report = collect_status(config).await?;

    if output.json {
        print_json(&report)?;
        return Ok(true);
    }

    let use_color = output.use_color();
    header("vaultgate status");
    println!("    Data dir:   {}", report.data_dir);
    println!("    Vault:      {}", yes_no(report.vault_present));
    println!("    Biometrics: {}", yes_no(report.biometrics_enrolled));
    println!(
        "    Credential: {} {}",
        mark(!report.credential_is_stale(), use_color),
        if report.credential_is_stale() {
            "stored without enrollment (removed on next launch)"
        } else {
            yes_no(report.credential_stored)
        }
    );
    println!("    Conceal:    {}", yes_no(report.conceal_tokens));
    println!();
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &std::path::Path) -> VaultgateConfig {
        let mut config = VaultgateConfig::default();
        config.device.data_dir = dir.to_string_lossy().into_owned();
        config
    }

    #[tokio::test]
    async fn status_reads_without_purging() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::write(dir.path().join("credential"), "secret").unwrap();
        std::fs::write(dir.path().join("preferences.json"), r#"{"concealTokens":"1"}"#).unwrap();

        let report = collect_status(&config).await.unwrap();

        assert!(!report.vault_present);
        assert!(report.credential_stored);
        assert!(report.conceal_tokens);
        assert!(report.credential_is_stale());
        assert!(dir.path().join("credential").exists());
    }

    #[tokio::test]
    async fn status_json_never_contains_secret() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::write(dir.path().join("biometrics.enrolled"), "").unwrap();
        std::fs::write(dir.path().join("credential"), "hunter2-unlock-token").unwrap();

        let report = collect_status(&config).await.unwrap();
        let json = serde_json::to_string(&report).unwrap();

        assert!(json.contains("\"credential_stored\":true"));
        assert!(!json.contains("hunter2-unlock-token"));
        assert!(!format!("{report:?}").contains("hunter2-unlock-token"));
        assert!(!report.credential_is_stale());
    }
}
