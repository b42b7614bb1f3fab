// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings consistency reconciliation.
//!
//! Enforces that a stored unlock credential never outlives the biometric
//! enrollment that authorized it, then derives the [`SettingsSnapshot`].
//! Steps run strictly in order; the credential is re-read only after any
//! removal has completed.

use std::sync::Arc;

use tracing::{debug, info};
use vaultgate_core::{
    BiometricEnrollment, Collaborator, CredentialStore, KeyValueStore, SettingsSnapshot,
    StoreKind, VaultgateError,
};

/// Derives the settings snapshot from enrollment, credential, and preference state.
#[derive(Clone)]
pub struct SettingsReconciler {
    enrollment: Arc<dyn BiometricEnrollment>,
    credentials: Arc<dyn CredentialStore>,
    preferences: Arc<dyn KeyValueStore>,
    conceal_tokens_key: String,
}

impl SettingsReconciler {
    pub fn new(
        enrollment: Arc<dyn BiometricEnrollment>,
        credentials: Arc<dyn CredentialStore>,
        preferences: Arc<dyn KeyValueStore>,
        conceal_tokens_key: impl Into<String>,
    ) -> Self {
        Self {
            enrollment,
            credentials,
            preferences,
            conceal_tokens_key: conceal_tokens_key.into(),
        }
    }

    /// Run the reconciliation.
    ///
    /// 1. Query enrollment.
    /// 2. If not enrolled, remove the stored credential (idempotent).
    /// 3. `biometric_unlock` is whether a credential is present now.
    /// 4. `conceal_tokens` is whether the preference key holds any value.
    ///
    /// Any failure propagates unchanged; no snapshot is produced.
    pub async fn reconcile(&self) -> Result<SettingsSnapshot, VaultgateError> {
        let enrolled = self.enrollment.is_enrolled().await?;

        if !enrolled {
            self.credentials.remove().await?;
            debug!(
                store = %self.credentials.name(),
                "biometrics not enrolled -- stored credential removed"
            );
        }

        let credential_present = self.credentials.get().await?.is_some();
        if credential_present && !enrolled {
            return Err(VaultgateError::store(
                StoreKind::Credential,
                "remove",
                "credential still present after removal",
            ));
        }

        let conceal_tokens = self
            .preferences
            .get(&self.conceal_tokens_key)
            .await?
            .is_some();

        let snapshot = SettingsSnapshot {
            biometric_unlock: credential_present,
            conceal_tokens,
        };
        info!(
            enrolled,
            biometric_unlock = snapshot.biometric_unlock,
            conceal_tokens = snapshot.conceal_tokens,
            "settings reconciled"
        );
        Ok(snapshot)
    }
}
