// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `vaultgate launch` command implementation.
//!
//! Runs one bootstrap against the device adapters and reports either the
//! landing screen with the settings snapshot, or every failed load.

use serde::Serialize;
use vaultgate_bootstrap::{
    BootstrapFailure, BootstrapOrchestrator, BootstrapOutcome, BootstrapPlan, Navigator,
    ResetReport, TaskFailure, VaultPhaseCell,
};
use vaultgate_config::VaultgateConfig;
use vaultgate_core::{NavigationPhase, Screen, SettingsSnapshot, VaultgateError};
use vaultgate_device::DeviceCollaborators;

use crate::OutputArgs;
use crate::output::{header, mark, print_json, yes_no};

/// Structured launch result for `--json` mode.
#[derive(Debug, Serialize)]
pub struct LaunchReport {
    pub ready: bool,
    pub attempts: u32,
    pub settings: Option<SettingsSnapshot>,
    pub initial_screen: Option<Screen>,
    pub phase: Option<NavigationPhase>,
    pub current_screen: Option<Screen>,
    pub reachable: Vec<Screen>,
    pub reset: Option<ResetReport>,
    pub failures: Vec<TaskFailure>,
}

impl LaunchReport {
    fn ready(outcome: BootstrapOutcome, unlock: bool) -> Self {
        let cell = VaultPhaseCell::new();
        let mut navigator = Navigator::from_outcome(&outcome, cell.subscribe());
        let initial_screen = navigator.current();
        if unlock {
            // Stands in for the authentication flow.
            cell.mark_unlocked();
        }
        Self {
            ready: true,
            attempts: outcome.attempts,
            settings: Some(outcome.settings),
            initial_screen: Some(initial_screen),
            phase: Some(navigator.phase()),
            current_screen: Some(navigator.current()),
            reachable: navigator.reachable().to_vec(),
            reset: outcome.reset,
            failures: Vec::new(),
        }
    }

    fn failed(failure: BootstrapFailure) -> Self {
        Self {
            ready: false,
            attempts: failure.attempts,
            settings: None,
            initial_screen: None,
            phase: None,
            current_screen: None,
            reachable: Vec::new(),
            reset: failure.reset,
            failures: failure.failures,
        }
    }
}

/// Run the `vaultgate launch` command. Returns whether the bootstrap became ready.
pub async fn run_launch(
    config: &VaultgateConfig,
    reset: bool,
    unlock: bool,
    output: OutputArgs,
) -> Result<bool, VaultgateError> {
    let device = DeviceCollaborators::from_config(config);
    let orchestrator =
        BootstrapOrchestrator::new(device.collaborators(), BootstrapPlan::from_config(config));

    let report = match orchestrator.run(reset || config.bootstrap.reset).await {
        Ok(outcome) => LaunchReport::ready(outcome, unlock),
        Err(failure) => LaunchReport::failed(failure),
    };

    if output.json {
        print_json(&report)?;
    } else {
        print_report(&report, output.use_color());
    }
    Ok(report.ready)
}

fn print_report(report: &LaunchReport, use_color: bool) {
    header("vaultgate launch");

    if let Some(reset) = &report.reset {
        for (step, outcome) in reset.steps() {
            println!("    Reset:    {} {step}", mark(outcome.is_done(), use_color));
        }
    }

    if !report.ready {
        println!(
            "    State:    {} bootstrap failed after {} attempt(s)",
            mark(false, use_color),
            report.attempts
        );
        for failure in &report.failures {
            println!(
                "      - {} ({}): {}",
                failure.task, failure.kind, failure.message
            );
        }
        println!();
        return;
    }

    println!("    State:    {} ready", mark(true, use_color));
    if let Some(settings) = report.settings {
        println!("    Biometric unlock: {}", yes_no(settings.biometric_unlock));
        println!("    Conceal tokens:   {}", yes_no(settings.conceal_tokens));
    }
    if let Some(screen) = report.initial_screen {
        println!("    Landing:  {screen}");
    }
    if report.phase == Some(NavigationPhase::PostVault) {
        let screens: Vec<String> = report.reachable.iter().map(ToString::to_string).collect();
        println!("    Unlocked: {}", screens.join(", "));
    }
    println!();
}
