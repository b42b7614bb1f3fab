// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Concurrent bootstrap orchestration.
//!
//! One bootstrap applies the reset directive, then dispatches the four
//! independent loads (vault check, settings reconciliation, image preload,
//! font preload) together and waits for every one of them to settle before
//! publishing a terminal [`BootstrapStatus`]. Readiness becomes true only
//! when all four succeeded.

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};
use vaultgate_config::{FailurePolicy, ResetPolicy, VaultgateConfig};
use vaultgate_core::{
    AssetRef, BootstrapErrorKind, Collaborators, FontMap, SettingsSnapshot, VaultgateError,
};

use crate::readiness::{
    BootstrapFailure, BootstrapOutcome, BootstrapStatus, BootstrapTask, ReadinessGate,
    TaskFailure,
};
use crate::reconcile::SettingsReconciler;
use crate::reset::{ResetReport, apply_reset_directive};

/// Static inputs of a bootstrap run.
#[derive(Debug, Clone)]
pub struct BootstrapPlan {
    pub images: Vec<AssetRef>,
    pub fonts: FontMap,
    pub conceal_tokens_key: String,
    /// Upper bound for each load. `None` waits forever.
    pub load_timeout: Option<Duration>,
    pub failure_policy: FailurePolicy,
    pub max_attempts: u32,
    pub retry_backoff: Duration,
    pub reset_policy: ResetPolicy,
}

impl BootstrapPlan {
    pub fn from_config(config: &VaultgateConfig) -> Self {
        let bootstrap = &config.bootstrap;
        let root = Path::new(&config.assets.root);
        let resolve = |file: &str| AssetRef(root.join(file).to_string_lossy().into_owned());

        Self {
            images: config.assets.images.iter().map(|i| resolve(i)).collect(),
            fonts: config
                .assets
                .fonts
                .iter()
                .map(|(family, file)| (family.clone(), resolve(file)))
                .collect(),
            conceal_tokens_key: config.preferences.conceal_tokens_key.clone(),
            load_timeout: (bootstrap.timeout_secs > 0)
                .then(|| Duration::from_secs(bootstrap.timeout_secs)),
            failure_policy: bootstrap.failure_policy,
            max_attempts: bootstrap.max_attempts,
            retry_backoff: Duration::from_millis(bootstrap.retry_backoff_ms),
            reset_policy: bootstrap.reset_policy,
        }
    }

    /// Attempts allowed by the failure policy, never fewer than one.
    pub fn attempt_budget(&self) -> u32 {
        match self.failure_policy {
            FailurePolicy::Abort => 1,
            FailurePolicy::Retry => self.max_attempts.max(1),
        }
    }
}

impl Default for BootstrapPlan {
    fn default() -> Self {
        Self::from_config(&VaultgateConfig::default())
    }
}

/// Runs one bootstrap and publishes its status.
pub struct BootstrapOrchestrator {
    collaborators: Collaborators,
    plan: BootstrapPlan,
    reconciler: SettingsReconciler,
    status: watch::Sender<BootstrapStatus>,
}

impl BootstrapOrchestrator {
    pub fn new(collaborators: Collaborators, plan: BootstrapPlan) -> Self {
        let reconciler = SettingsReconciler::new(
            collaborators.enrollment.clone(),
            collaborators.credentials.clone(),
            collaborators.preferences.clone(),
            plan.conceal_tokens_key.clone(),
        );
        let (status, _rx) = watch::channel(BootstrapStatus::Loading);
        Self {
            collaborators,
            plan,
            reconciler,
            status,
        }
    }

    /// A gate that reports `Loading` until this orchestrator finishes.
    pub fn readiness(&self) -> ReadinessGate {
        ReadinessGate::new(self.status.subscribe())
    }

    pub fn plan(&self) -> &BootstrapPlan {
        &self.plan
    }

    /// Run the bootstrap to a terminal state.
    ///
    /// The reset directive is applied first and at most once, even when the
    /// loads are retried. Consuming `self` makes the terminal transition
    /// happen exactly once.
    pub async fn run(self, reset_directive: bool) -> Result<BootstrapOutcome, BootstrapFailure> {
        let started = Instant::now();
        info!(reset = reset_directive, "bootstrap started");
        let c = &self.collaborators;
        let reset = apply_reset_directive(
            reset_directive,
            c.vault.as_ref(),
            c.credentials.as_ref(),
            c.preferences.as_ref(),
            self.plan.load_timeout,
        )
        .await;

        if let Some(report) = reset.as_ref().filter(|r| !r.is_clean())
            && self.plan.reset_policy == ResetPolicy::HaltOnFailure
        {
            let failure = BootstrapFailure {
                failures: reset_failures(report),
                attempts: 0,
                reset: reset.clone(),
            };
            return Err(self.fail(failure));
        }

        let budget = self.plan.attempt_budget();
        let mut attempt = 1;
        loop {
            debug!(attempt, budget, "dispatching bootstrap loads");
            match self.attempt().await {
                Ok((vault_present, settings)) => {
                    let outcome = BootstrapOutcome {
                        vault_present,
                        settings,
                        reset,
                        attempts: attempt,
                    };
                    info!(
                        vault_present,
                        attempts = attempt,
                        initial_route = %outcome.initial_route(),
                        elapsed = ?started.elapsed(),
                        "bootstrap ready"
                    );
                    self.status
                        .send_replace(BootstrapStatus::Ready(outcome.clone()));
                    return Ok(outcome);
                }
                Err(failures) => {
                    for failure in &failures {
                        warn!(
                            attempt,
                            task = %failure.task,
                            kind = %failure.kind,
                            error = %failure.message,
                            "bootstrap load failed"
                        );
                    }
                    if attempt >= budget {
                        let failure = BootstrapFailure {
                            failures,
                            attempts: attempt,
                            reset,
                        };
                        return Err(self.fail(failure));
                    }
                    if !self.plan.retry_backoff.is_zero() {
                        tokio::time::sleep(self.plan.retry_backoff).await;
                    }
                    attempt += 1;
                }
            }
        }
    }

    /// One attempt: every load is dispatched together and all of them settle
    /// before the result is inspected.
    async fn attempt(&self) -> Result<(bool, SettingsSnapshot), Vec<TaskFailure>> {
        let c = &self.collaborators;
        let (vault, settings, images, fonts) = tokio::join!(
            self.bounded(BootstrapTask::VaultCheck, c.vault.exists()),
            self.bounded(BootstrapTask::Settings, self.reconciler.reconcile()),
            self.bounded(BootstrapTask::Assets, c.assets.load(&self.plan.images)),
            self.bounded(BootstrapTask::Fonts, c.fonts.load(&self.plan.fonts)),
        );

        let mut failures = Vec::new();
        let vault = vault.map_err(|f| failures.push(f)).ok();
        let settings = settings.map_err(|f| failures.push(f)).ok();
        if let Err(f) = images {
            failures.push(f);
        }
        if let Err(f) = fonts {
            failures.push(f);
        }

        match (vault, settings) {
            (Some(vault_present), Some(settings)) if failures.is_empty() => {
                Ok((vault_present, settings))
            }
            _ => Err(failures),
        }
    }

    /// Apply the per-load timeout and tag any error with its task.
    async fn bounded<T>(
        &self,
        task: BootstrapTask,
        load: impl Future<Output = Result<T, VaultgateError>>,
    ) -> Result<T, TaskFailure> {
        let result = match self.plan.load_timeout {
            Some(limit) => match tokio::time::timeout(limit, load).await {
                Ok(result) => result,
                Err(_) => Err(VaultgateError::Timeout { duration: limit }),
            },
            None => load.await,
        };
        result.map_err(|e| TaskFailure::from_error(task, &e))
    }

    fn fail(&self, failure: BootstrapFailure) -> BootstrapFailure {
        error!(error = %failure, "bootstrap failed");
        self.status
            .send_replace(BootstrapStatus::Failed(failure.clone()));
        failure
    }
}

fn reset_failures(report: &ResetReport) -> Vec<TaskFailure> {
    report
        .failures()
        .into_iter()
        .map(|(step, message)| TaskFailure {
            task: BootstrapTask::Reset,
            kind: BootstrapErrorKind::Reset,
            message: format!("{step}: {message}"),
        })
        .collect()
}
