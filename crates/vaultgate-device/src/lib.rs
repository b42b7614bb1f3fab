// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! File-backed collaborators.
//!
//! Every store lives under `device.data_dir`. Presence of a file is the
//! state: the vault exists when its file does, biometrics are enrolled when
//! the marker file exists, and so on. Image and font preloads read from the
//! already-resolved asset paths.

pub mod preload;
pub mod store;

use std::sync::Arc;

use vaultgate_config::VaultgateConfig;
use vaultgate_core::Collaborators;

pub use preload::{FileAssetPreloader, FileFontPreloader};
pub use store::{FileCredentialStore, FileVault, JsonKeyValueStore, MarkerEnrollment};

/// Typed handles on every device adapter.
#[derive(Debug, Clone)]
pub struct DeviceCollaborators {
    pub vault: Arc<FileVault>,
    pub credentials: Arc<FileCredentialStore>,
    pub preferences: Arc<JsonKeyValueStore>,
    pub enrollment: Arc<MarkerEnrollment>,
    pub assets: Arc<FileAssetPreloader>,
    pub fonts: Arc<FileFontPreloader>,
}

impl DeviceCollaborators {
    pub fn from_config(config: &VaultgateConfig) -> Self {
        let device = &config.device;
        Self {
            vault: Arc::new(FileVault::new(device.path(&device.vault_file))),
            credentials: Arc::new(FileCredentialStore::new(
                device.path(&device.credential_file),
            )),
            preferences: Arc::new(JsonKeyValueStore::new(
                device.path(&device.preferences_file),
            )),
            enrollment: Arc::new(MarkerEnrollment::new(
                device.path(&device.biometric_marker),
            )),
            assets: Arc::new(FileAssetPreloader),
            fonts: Arc::new(FileFontPreloader),
        }
    }

    /// Trait-object view for the bootstrap.
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
