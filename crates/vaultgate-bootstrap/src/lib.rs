// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential-gated application bootstrap.
//!
//! Startup runs in this order:
//!
//! 1. [`apply_reset_directive`] wipes the vault, credential, and preferences
//!    when asked to.
//! 2. [`BootstrapOrchestrator`] runs the vault check, the
//!    [`SettingsReconciler`], and both preloads concurrently, then publishes
//!    a terminal [`BootstrapStatus`] through its [`ReadinessGate`].
//! 3. A [`Navigator`] built from the [`BootstrapOutcome`] lands on
//!    `Authentication` or `Welcome` and swaps to the post-vault subgraph once
//!    the [`VaultPhaseCell`] is marked unlocked.

pub mod navigation;
pub mod orchestrator;
pub mod phase;
pub mod readiness;
pub mod reconcile;
pub mod reset;

pub use navigation::{InitialRoute, NavigationError, Navigator};
pub use orchestrator::{BootstrapOrchestrator, BootstrapPlan};
pub use phase::{PhaseReceiver, VaultPhaseCell};
pub use readiness::{
    BootstrapFailure, BootstrapOutcome, BootstrapStatus, BootstrapTask, ReadinessGate,
    TaskFailure,
};
pub use reconcile::SettingsReconciler;
pub use reset::{ResetReport, ResetStep, StepOutcome, apply_reset_directive, reset_all};
