// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reset directive handling.
//!
//! A reset wipes the vault, the stored unlock credential, and every
//! preference. The three deletions are independent: they run concurrently,
//! all of them always settle, and each outcome is reported individually so a
//! partial failure is never silent. A step that outlives the optional limit
//! is reported as failed rather than holding up the bootstrap.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use strum::Display;
use tracing::{info, warn};
use vaultgate_core::{CredentialStore, KeyValueStore, VaultExistence, VaultgateError};

/// The three destructive steps of a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ResetStep {
    VaultDeletion,
    CredentialRemoval,
    StorageClear,
}

/// Result of a single reset step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum StepOutcome {
    Done,
    Failed(String),
}

impl StepOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, StepOutcome::Done)
    }
}

impl From<Result<(), VaultgateError>> for StepOutcome {
    fn from(result: Result<(), VaultgateError>) -> Self {
        match result {
            Ok(()) => StepOutcome::Done,
            Err(e) => StepOutcome::Failed(e.to_string()),
        }
    }
}

/// Outcome of every reset step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetReport {
    pub vault_deleted: StepOutcome,
    pub credential_removed: StepOutcome,
    pub storage_cleared: StepOutcome,
}

impl ResetReport {
    /// All three steps, in a fixed order.
    pub fn steps(&self) -> [(ResetStep, &StepOutcome); 3] {
        [
            (ResetStep::VaultDeletion, &self.vault_deleted),
            (ResetStep::CredentialRemoval, &self.credential_removed),
            (ResetStep::StorageClear, &self.storage_cleared),
        ]
    }

    /// True when every step succeeded.
    pub fn is_clean(&self) -> bool {
        self.steps().iter().all(|(_, outcome)| outcome.is_done())
    }

    /// The failed steps with their error messages.
    pub fn failures(&self) -> Vec<(ResetStep, &str)> {
        self.steps()
            .into_iter()
            .filter_map(|(step, outcome)| match outcome {
                StepOutcome::Failed(message) => Some((step, message.as_str())),
                StepOutcome::Done => None,
            })
            .collect()
    }
}

/// Apply the reset directive.
///
/// Returns `None` without touching any store when `directive` is false.
pub async fn apply_reset_directive(
    directive: bool,
    vault: &dyn VaultExistence,
    credentials: &dyn CredentialStore,
    preferences: &dyn KeyValueStore,
    limit: Option<Duration>,
) -> Option<ResetReport> {
    if !directive {
        return None;
    }
    Some(reset_all(vault, credentials, preferences, limit).await)
}

/// Wipe the vault, the credential, and every preference.
///
/// All three deletions are dispatched together and the report carries each
/// outcome; a failing step never prevents the others. With a `limit`, each
/// step that has not settled in time is recorded as timed out.
pub async fn reset_all(
    vault: &dyn VaultExistence,
    credentials: &dyn CredentialStore,
    preferences: &dyn KeyValueStore,
    limit: Option<Duration>,
) -> ResetReport {
    info!("wiping vault, credential, and preferences");

    let (vault_deleted, credential_removed, storage_cleared) = tokio::join!(
        within(limit, vault.delete()),
        within(limit, credentials.remove()),
        within(limit, preferences.clear()),
    );

    let report = ResetReport {
        vault_deleted: vault_deleted.into(),
        credential_removed: credential_removed.into(),
        storage_cleared: storage_cleared.into(),
    };

    for (step, error) in report.failures() {
        warn!(step = %step, error = %error, "reset step failed");
    }
    if report.is_clean() {
        info!("reset complete");
    }

    report
}

async fn within(
    limit: Option<Duration>,
    step: impl Future<Output = Result<(), VaultgateError>>,
) -> Result<(), VaultgateError> {
    match limit {
        Some(duration) => tokio::time::timeout(duration, step)
            .await
            .unwrap_or(Err(VaultgateError::Timeout { duration })),
        None => step.await,
    }
}
