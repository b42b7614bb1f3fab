// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end bootstrap testing.
//!
//! `TestHarness` holds one fake per collaborator plus a configuration, and
//! keeps typed handles on the fakes so tests can inspect them after a run.

use std::sync::Arc;

use vaultgate_config::VaultgateConfig;
use vaultgate_core::Collaborators;

use crate::fake_preload::{FakeAssetPreloader, FakeFontPreloader};
use crate::fake_stores::{FakeCredentialStore, FakeEnrollment, FakeKeyValueStore, FakeVault};

/// Builder for creating test environments with configurable fakes.
pub struct TestHarnessBuilder {
    vault: FakeVault,
    credentials: FakeCredentialStore,
    preferences: FakeKeyValueStore,
    enrollment: FakeEnrollment,
    assets: FakeAssetPreloader,
    fonts: FakeFontPreloader,
    config: VaultgateConfig,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        let mut config = VaultgateConfig::default();
        config.bootstrap.retry_backoff_ms = 0;
        Self {
            vault: FakeVault::absent(),
            credentials: FakeCredentialStore::empty(),
            preferences: FakeKeyValueStore::new(),
            enrollment: FakeEnrollment::enrolled(),
            assets: FakeAssetPreloader::new(),
            fonts: FakeFontPreloader::new(),
            config,
        }
    }

    pub fn with_vault(mut self, vault: FakeVault) -> Self {
        self.vault = vault;
        self
    }

    pub fn with_credentials(mut self, credentials: FakeCredentialStore) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_preferences(mut self, preferences: FakeKeyValueStore) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn with_enrollment(mut self, enrollment: FakeEnrollment) -> Self {
        self.enrollment = enrollment;
        self
    }

    pub fn with_assets(mut self, assets: FakeAssetPreloader) -> Self {
        self.assets = assets;
        self
    }

    pub fn with_fonts(mut self, fonts: FakeFontPreloader) -> Self {
        self.fonts = fonts;
        self
    }

    /// Replace the configuration. Retry backoff defaults to zero otherwise.
    pub fn with_config(mut self, config: VaultgateConfig) -> Self {
        self.config = config;
        self
    }

    /// Adjust the configuration in place.
    pub fn configure(mut self, f: impl FnOnce(&mut VaultgateConfig)) -> Self {
        f(&mut self.config);
        self
    }

    pub fn build(self) -> TestHarness {
        TestHarness {
            vault: Arc::new(self.vault),
            credentials: Arc::new(self.credentials),
            preferences: Arc::new(self.preferences),
            enrollment: Arc::new(self.enrollment),
            assets: Arc::new(self.assets),
            fonts: Arc::new(self.fonts),
            config: self.config,
        }
    }
}

/// A complete set of fakes for bootstrap testing.
pub struct TestHarness {
    pub vault: Arc<FakeVault>,
    pub credentials: Arc<FakeCredentialStore>,
    pub preferences: Arc<FakeKeyValueStore>,
    pub enrollment: Arc<FakeEnrollment>,
    pub assets: Arc<FakeAssetPreloader>,
    pub fonts: Arc<FakeFontPreloader>,
    pub config: VaultgateConfig,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Trait-object handles on every fake, sharing state with the typed ones.
    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            vault: self.vault.clone(),
            credentials: self.credentials.clone(),
            preferences: self.preferences.clone(),
            enrollment: self.enrollment.clone(),
            assets: self.assets.clone(),
            fonts: self.fonts.clone(),
        }
    }
}
