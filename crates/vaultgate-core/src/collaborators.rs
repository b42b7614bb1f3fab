// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The full set of collaborators a bootstrap runs against.

use std::sync::Arc;

use crate::traits::{
    AssetPreloader, BiometricEnrollment, Collaborator, CredentialStore, FontPreloader, KeyValueStore,
    VaultExistence,
};

/// Shared handles on every external system the bootstrap touches.
#[derive(Clone)]
pub struct Collaborators {
    pub vault: Arc<dyn VaultExistence>,
    pub credentials: Arc<dyn CredentialStore>,
    pub preferences: Arc<dyn KeyValueStore>,
    pub enrollment: Arc<dyn BiometricEnrollment>,
    pub assets: Arc<dyn AssetPreloader>,
    pub fonts: Arc<dyn FontPreloader>,
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("vault", &self.vault.name())
            .field("credentials", &self.credentials.name())
            .field("preferences", &self.preferences.name())
            .field("enrollment", &self.enrollment.name())
            .field("assets", &self.assets.name())
            .field("fonts", &self.fonts.name())
            .finish()
    }
}
