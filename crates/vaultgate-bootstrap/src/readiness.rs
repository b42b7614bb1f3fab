// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bootstrap status and the readiness gate.
//!
//! Status moves `Loading -> Ready` or `Loading -> Failed` exactly once and
//! never changes afterwards. The rendering layer watches a [`ReadinessGate`]
//! and keeps the splash screen up while the status is `Loading`.

use serde::Serialize;
use strum::Display;
use tokio::sync::watch;
use vaultgate_core::{BootstrapErrorKind, SettingsSnapshot, VaultgateError};

use crate::navigation::InitialRoute;
use crate::reset::ResetReport;

/// The units of work a bootstrap can fail in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BootstrapTask {
    Reset,
    VaultCheck,
    Settings,
    Assets,
    Fonts,
}

impl BootstrapTask {
    /// Kind reported for errors outside the taxonomy (e.g. internal adapter bugs).
    fn fallback_kind(self) -> BootstrapErrorKind {
        match self {
            BootstrapTask::Reset => BootstrapErrorKind::Reset,
            BootstrapTask::VaultCheck | BootstrapTask::Settings => BootstrapErrorKind::StoreAccess,
            BootstrapTask::Assets | BootstrapTask::Fonts => BootstrapErrorKind::AssetLoad,
        }
    }
}

/// One failed bootstrap load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskFailure {
    pub task: BootstrapTask,
    pub kind: BootstrapErrorKind,
    pub message: String,
}

impl TaskFailure {
    pub fn from_error(task: BootstrapTask, error: &VaultgateError) -> Self {
        Self {
            task,
            kind: error.kind().unwrap_or_else(|| task.fallback_kind()),
            message: error.to_string(),
        }
    }
}

/// Everything a successful bootstrap hands to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapOutcome {
    pub vault_present: bool,
    pub settings: SettingsSnapshot,
    /// Present when the reset directive ran.
    pub reset: Option<ResetReport>,
    /// Attempts used, including the successful one.
    pub attempts: u32,
}

impl BootstrapOutcome {
    /// The screen to land on inside the pre-vault subgraph.
    pub fn initial_route(&self) -> InitialRoute {
        InitialRoute::select(self.vault_present)
    }
}

/// Terminal bootstrap failure, carrying every failed load of the last attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapFailure {
    pub failures: Vec<TaskFailure>,
    pub attempts: u32,
    pub reset: Option<ResetReport>,
}

impl BootstrapFailure {
    /// The orchestrator went away before reaching a terminal state.
    pub(crate) fn abandoned() -> Self {
        Self {
            failures: Vec::new(),
            attempts: 0,
            reset: None,
        }
    }

    /// Distinct failure kinds, in the order first seen.
    pub fn kinds(&self) -> Vec<BootstrapErrorKind> {
        let mut kinds = Vec::new();
        for failure in &self.failures {
            if !kinds.contains(&failure.kind) {
                kinds.push(failure.kind);
            }
        }
        kinds
    }

    /// Whether `task` is among the failed loads.
    pub fn failed(&self, task: BootstrapTask) -> bool {
        self.failures.iter().any(|f| f.task == task)
    }
}

impl std::fmt::Display for BootstrapFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.failures.is_empty() {
            return write!(f, "bootstrap abandoned before completion");
        }
        write!(f, "bootstrap failed after {} attempt(s): ", self.attempts)?;
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{} ({}): {}", failure.task, failure.kind, failure.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for BootstrapFailure {}

/// Bootstrap state as seen by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapStatus {
    Loading,
    Ready(BootstrapOutcome),
    Failed(BootstrapFailure),
}

impl BootstrapStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, BootstrapStatus::Ready(_))
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, BootstrapStatus::Loading)
    }
}

/// Read-only handle on the bootstrap status.
#[derive(Debug, Clone)]
pub struct ReadinessGate {
    rx: watch::Receiver<BootstrapStatus>,
}

impl ReadinessGate {
    pub(crate) fn new(rx: watch::Receiver<BootstrapStatus>) -> Self {
        Self { rx }
    }

    /// True only once every bootstrap load has succeeded.
    pub fn is_ready(&self) -> bool {
        self.rx.borrow().is_ready()
    }

    /// Snapshot of the current status.
    pub fn status(&self) -> BootstrapStatus {
        self.rx.borrow().clone()
    }

    /// Wait for the terminal state.
    pub async fn wait(&mut self) -> Result<BootstrapOutcome, BootstrapFailure> {
        let status = match self.rx.wait_for(BootstrapStatus::is_terminal).await {
            Ok(status) => status.clone(),
            Err(_) => return Err(BootstrapFailure::abandoned()),
        };
        match status {
            BootstrapStatus::Ready(outcome) => Ok(outcome),
            BootstrapStatus::Failed(failure) => Err(failure),
            BootstrapStatus::Loading => Err(BootstrapFailure::abandoned()),
        }
    }
}
