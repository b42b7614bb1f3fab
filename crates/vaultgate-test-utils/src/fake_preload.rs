// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Image and font preload fakes.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use vaultgate_core::{
    AssetPreloader, AssetRef, Collaborator, CollaboratorKind, FontMap, FontPreloader,
    VaultgateError,
};

use crate::fault::{Calls, Fault, lock, pause};

/// Records every image it is asked to load.
#[derive(Debug, Default)]
pub struct FakeAssetPreloader {
    loaded: Mutex<Vec<AssetRef>>,
    delay: Duration,
    fault: Fault,
    calls: Calls,
}

impl FakeAssetPreloader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn fail_load(&self, message: impl Into<String>) {
        self.fault.always(message);
    }

    pub fn fail_load_times(&self, count: u32, message: impl Into<String>) {
        self.fault.times(count, message);
    }

    /// Images loaded by successful calls.
    pub fn loaded(&self) -> Vec<AssetRef> {
        lock(&self.loaded).clone()
    }

    pub fn load_calls(&self) -> u32 {
        self.calls.get()
    }
}

impl Collaborator for FakeAssetPreloader {
    fn name(&self) -> &str {
        "fake-assets"
    }

    fn kind(&self) -> CollaboratorKind {
        CollaboratorKind::AssetPreloader
    }
}

#[async_trait]
impl AssetPreloader for FakeAssetPreloader {
    async fn load(&self, resources: &[AssetRef]) -> Result<(), VaultgateError> {
        self.calls.record();
        pause(self.delay).await;
        if let Some(message) = self.fault.fire() {
            let resource = resources.first().map_or("images", AssetRef::as_str);
            return Err(VaultgateError::asset(resource, message));
        }
        lock(&self.loaded).extend_from_slice(resources);
        Ok(())
    }
}

/// Records every font family it is asked to load.
#[derive(Debug, Default)]
pub struct FakeFontPreloader {
    families: Mutex<Vec<String>>,
    delay: Duration,
    fault: Fault,
    calls: Calls,
}

impl FakeFontPreloader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn fail_load(&self, message: impl Into<String>) {
        self.fault.always(message);
    }

    pub fn fail_load_times(&self, count: u32, message: impl Into<String>) {
        self.fault.times(count, message);
    }

    /// Families loaded by successful calls.
    pub fn families(&self) -> Vec<String> {
        lock(&self.families).clone()
    }

    pub fn load_calls(&self) -> u32 {
        self.calls.get()
    }
}

impl Collaborator for FakeFontPreloader {
    fn name(&self) -> &str {
        "fake-fonts"
    }

    fn kind(&self) -> CollaboratorKind {
        CollaboratorKind::FontPreloader
    }
}

#[async_trait]
impl FontPreloader for FakeFontPreloader {
    async fn load(&self, fonts: &FontMap) -> Result<(), VaultgateError> {
        self.calls.record();
        pause(self.delay).await;
        if let Some(message) = self.fault.fire() {
            let family = fonts.keys().next().map_or("fonts", String::as_str);
            return Err(VaultgateError::asset(family, message));
        }
        lock(&self.families).extend(fonts.keys().cloned());
        Ok(())
    }
}
