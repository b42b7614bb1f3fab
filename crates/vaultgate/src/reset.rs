// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `vaultgate reset` command implementation.

use vaultgate_bootstrap::{BootstrapPlan, ResetReport, StepOutcome, reset_all};
use vaultgate_config::VaultgateConfig;
use vaultgate_core::VaultgateError;
use vaultgate_device::DeviceCollaborators;

use crate::OutputArgs;
use crate::output::{header, mark, print_json};

/// Wipe the device stores.
pub async fn reset_device(config: &VaultgateConfig) -> ResetReport {
    let device = DeviceCollaborators::from_config(config);
    reset_all(
        device.vault.as_ref(),
        device.credentials.as_ref(),
        device.preferences.as_ref(),
        BootstrapPlan::from_config(config).load_timeout,
    )
    .await
}

/// Run the `vaultgate reset` command. Returns whether every step succeeded.
pub async fn run_reset(config: &VaultgateConfig, output: OutputArgs) -> Result<bool, VaultgateError> {
    let report = reset_device(config).await;

    if output.json {
        print_json(&report)?;
        return Ok(report.is_clean());
    }

    let use_color = output.use_color();
    header("vaultgate reset");
    for (step, outcome) in report.steps() {
        match outcome {
            StepOutcome::Done => {
                println!("    {} {step}", mark(true, use_color));
            }
            StepOutcome::Failed(error) => {
                println!("    {} {step}: {error}", mark(false, use_color));
            }
        }
    }
    println!();
    Ok(report.is_clean())
}
