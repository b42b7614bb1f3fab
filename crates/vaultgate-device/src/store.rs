// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! File-backed vault, credential, preference, and enrollment stores.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use secrecy::SecretString;
use serde_json::{Map, Value};
use tracing::debug;
use vaultgate_core::{
    BiometricEnrollment, Collaborator, CollaboratorKind, CredentialStore, KeyValueStore,
    StoreKind, VaultExistence, VaultgateError,
};

/// Whether `path` exists. Any error other than "not found" is surfaced.
async fn file_exists(path: &Path) -> std::io::Result<bool> {
    tokio::fs::try_exists(path).await
}

/// Remove `path`, treating an already missing file as success.
async fn remove_if_exists(path: &Path) -> std::io::Result<()> {
    match tokio::fs::remove_file(path).await {
        Err(e) if e.kind() != ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

/// Read `path` as UTF-8, mapping a missing file to `None`.
async fn read_optional(path: &Path) -> std::io::Result<Option<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// The vault is present when its file exists. Contents are never read.
#[derive(Debug, Clone)]
pub struct FileVault {
    path: PathBuf,
}

impl FileVault {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Collaborator for FileVault {
    fn name(&self) -> &str {
        "file-vault"
    }

    fn kind(&self) -> CollaboratorKind {
        CollaboratorKind::VaultExistence
    }
}

#[async_trait]
impl VaultExistence for FileVault {
    async fn exists(&self) -> Result<bool, VaultgateError> {
        file_exists(&self.path)
            .await
            .map_err(|e| VaultgateError::store(StoreKind::Vault, "exists", e))
    }

    async fn delete(&self) -> Result<(), VaultgateError> {
        remove_if_exists(&self.path)
            .await
            .map_err(|e| VaultgateError::store(StoreKind::Vault, "delete", e))?;
        debug!(path = %self.path.display(), "vault file removed");
        Ok(())
    }
}

/// Unlock credential kept in a single file. Blank content counts as absent.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Collaborator for FileCredentialStore {
    fn name(&self) -> &str {
        "file-credential-store"
    }

    fn kind(&self) -> CollaboratorKind {
        CollaboratorKind::CredentialStore
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self) -> Result<Option<SecretString>, VaultgateError> {
        let content = read_optional(&self.path)
            .await
            .map_err(|e| VaultgateError::store(StoreKind::Credential, "get", e))?;
        Ok(content
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .map(SecretString::from))
    }

    async fn remove(&self) -> Result<(), VaultgateError> {
        remove_if_exists(&self.path)
            .await
            .map_err(|e| VaultgateError::store(StoreKind::Credential, "remove", e))
    }
}

/// Preferences stored as one flat JSON object.
#[derive(Debug, Clone)]
pub struct JsonKeyValueStore {
    path: PathBuf,
}

impl JsonKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn entries(&self) -> Result<Map<String, Value>, VaultgateError> {
        let Some(content) = read_optional(&self.path)
            .await
            .map_err(|e| VaultgateError::store(StoreKind::Preferences, "get", e))?
        else {
            return Ok(Map::new());
        };
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&content)
            .map_err(|e| VaultgateError::store(StoreKind::Preferences, "get", e))
    }
}

impl Collaborator for JsonKeyValueStore {
    fn name(&self) -> &str {
        "json-preferences"
    }

    fn kind(&self) -> CollaboratorKind {
        CollaboratorKind::KeyValueStore
    }
}

#[async_trait]
impl KeyValueStore for JsonKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, VaultgateError> {
        let value = match self.entries().await?.remove(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        };
        Ok(value)
    }

    async fn clear(&self) -> Result<(), VaultgateError> {
        remove_if_exists(&self.path)
            .await
            .map_err(|e| VaultgateError::store(StoreKind::Preferences, "clear", e))
    }
}

/// Biometrics count as enrolled while the marker file exists.
#[derive(Debug, Clone)]
pub struct MarkerEnrollment {
    path: PathBuf,
}

impl MarkerEnrollment {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Collaborator for MarkerEnrollment {
    fn name(&self) -> &str {
        "marker-enrollment"
    }

    fn kind(&self) -> CollaboratorKind {
        CollaboratorKind::BiometricEnrollment
    }
}

#[async_trait]
impl BiometricEnrollment for MarkerEnrollment {
    async fn is_enrolled(&self) -> Result<bool, VaultgateError> {
        file_exists(&self.path)
            .await
            .map_err(VaultgateError::enrollment)
    }
}
