// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory fakes for the vault, credential, preference, and enrollment stores.
//!
//! Every fake counts its calls, can be told to fail (forever or for the next
//! `n` calls), and can simulate latency with `with_delay`.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::SecretString;
use vaultgate_core::{
    BiometricEnrollment, Collaborator, CollaboratorKind, CredentialStore, KeyValueStore,
    StoreKind, VaultExistence, VaultgateError,
};

use crate::fault::{Calls, Fault, lock, pause};

/// Vault whose presence is a boolean flag.
#[derive(Debug, Default)]
pub struct FakeVault {
    present: Mutex<bool>,
    delay: Duration,
    exists_fault: Fault,
    delete_fault: Fault,
    exists_calls: Calls,
    delete_calls: Calls,
}

impl FakeVault {
    pub fn present() -> Self {
        Self {
            present: Mutex::new(true),
            ..Self::default()
        }
    }

    pub fn absent() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn is_present(&self) -> bool {
        *lock(&self.present)
    }

    pub fn fail_exists(&self, message: impl Into<String>) {
        self.exists_fault.always(message);
    }

    /// Fail the next `count` existence checks, then recover.
    pub fn fail_exists_times(&self, count: u32, message: impl Into<String>) {
        self.exists_fault.times(count, message);
    }

    pub fn fail_delete(&self, message: impl Into<String>) {
        self.delete_fault.always(message);
    }

    pub fn exists_calls(&self) -> u32 {
        self.exists_calls.get()
    }

    pub fn delete_calls(&self) -> u32 {
        self.delete_calls.get()
    }
}

impl Collaborator for FakeVault {
    fn name(&self) -> &str {
        "fake-vault"
    }

    fn kind(&self) -> CollaboratorKind {
        CollaboratorKind::VaultExistence
    }
}

#[async_trait]
impl VaultExistence for FakeVault {
    async fn exists(&self) -> Result<bool, VaultgateError> {
        self.exists_calls.record();
        pause(self.delay).await;
        if let Some(message) = self.exists_fault.fire() {
            return Err(VaultgateError::store(StoreKind::Vault, "exists", message));
        }
        Ok(self.is_present())
    }

    async fn delete(&self) -> Result<(), VaultgateError> {
        self.delete_calls.record();
        pause(self.delay).await;
        if let Some(message) = self.delete_fault.fire() {
            return Err(VaultgateError::store(StoreKind::Vault, "delete", message));
        }
        *lock(&self.present) = false;
        Ok(())
    }
}

/// Credential store holding at most one secret.
#[derive(Debug, Default)]
pub struct FakeCredentialStore {
    credential: Mutex<Option<String>>,
    ignore_removal: bool,
    delay: Duration,
    get_fault: Fault,
    remove_fault: Fault,
    get_calls: Calls,
    remove_calls: Calls,
}

impl FakeCredentialStore {
    pub fn with_credential(secret: impl Into<String>) -> Self {
        Self {
            credential: Mutex::new(Some(secret.into())),
            ..Self::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Report removal as successful but keep the secret.
    pub fn ignoring_removal(mut self) -> Self {
        self.ignore_removal = true;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn has_credential(&self) -> bool {
        lock(&self.credential).is_some()
    }

    pub fn fail_get(&self, message: impl Into<String>) {
        self.get_fault.always(message);
    }

    pub fn fail_remove(&self, message: impl Into<String>) {
        self.remove_fault.always(message);
    }

    pub fn get_calls(&self) -> u32 {
        self.get_calls.get()
    }

    pub fn remove_calls(&self) -> u32 {
        self.remove_calls.get()
    }
}

impl Collaborator for FakeCredentialStore {
    fn name(&self) -> &str {
        "fake-credential-store"
    }

    fn kind(&self) -> CollaboratorKind {
        CollaboratorKind::CredentialStore
    }
}

#[async_trait]
impl CredentialStore for FakeCredentialStore {
    async fn get(&self) -> Result<Option<SecretString>, VaultgateError> {
        self.get_calls.record();
        pause(self.delay).await;
        if let Some(message) = self.get_fault.fire() {
            return Err(VaultgateError::store(StoreKind::Credential, "get", message));
        }
        Ok(lock(&self.credential).clone().map(SecretString::from))
    }

    async fn remove(&self) -> Result<(), VaultgateError> {
        self.remove_calls.record();
        pause(self.delay).await;
        if let Some(message) = self.remove_fault.fire() {
            return Err(VaultgateError::store(
                StoreKind::Credential,
                "remove",
                message,
            ));
        }
        if !self.ignore_removal {
            *lock(&self.credential) = None;
        }
        Ok(())
    }
}

/// String-keyed preference store.
#[derive(Debug, Default)]
pub struct FakeKeyValueStore {
    entries: Mutex<BTreeMap<String, String>>,
    delay: Duration,
    get_fault: Fault,
    clear_fault: Fault,
    clear_calls: Calls,
}

impl FakeKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        lock(&self.entries).insert(key.into(), value.into());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn value(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn fail_get(&self, message: impl Into<String>) {
        self.get_fault.always(message);
    }

    pub fn fail_clear(&self, message: impl Into<String>) {
        self.clear_fault.always(message);
    }

    pub fn clear_calls(&self) -> u32 {
        self.clear_calls.get()
    }
}

impl Collaborator for FakeKeyValueStore {
    fn name(&self) -> &str {
        "fake-key-value-store"
    }

    fn kind(&self) -> CollaboratorKind {
        CollaboratorKind::KeyValueStore
    }
}

#[async_trait]
impl KeyValueStore for FakeKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, VaultgateError> {
        pause(self.delay).await;
        if let Some(message) = self.get_fault.fire() {
            return Err(VaultgateError::store(StoreKind::Preferences, "get", message));
        }
        Ok(self.value(key))
    }

    async fn clear(&self) -> Result<(), VaultgateError> {
        self.clear_calls.record();
        pause(self.delay).await;
        if let Some(message) = self.clear_fault.fire() {
            return Err(VaultgateError::store(
                StoreKind::Preferences,
                "clear",
                message,
            ));
        }
        lock(&self.entries).clear();
        Ok(())
    }
}

/// Biometric enrollment as a boolean flag.
#[derive(Debug, Default)]
pub struct FakeEnrollment {
    enrolled: Mutex<bool>,
    delay: Duration,
    fault: Fault,
    calls: Calls,
}

impl FakeEnrollment {
    pub fn enrolled() -> Self {
        Self {
            enrolled: Mutex::new(true),
            ..Self::default()
        }
    }

    pub fn not_enrolled() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn set_enrolled(&self, enrolled: bool) {
        *lock(&self.enrolled) = enrolled;
    }

    pub fn fail_query(&self, message: impl Into<String>) {
        self.fault.always(message);
    }

    pub fn fail_query_times(&self, count: u32, message: impl Into<String>) {
        self.fault.times(count, message);
    }

    pub fn query_calls(&self) -> u32 {
        self.calls.get()
    }
}

impl Collaborator for FakeEnrollment {
    fn name(&self) -> &str {
        "fake-enrollment"
    }

    fn kind(&self) -> CollaboratorKind {
        CollaboratorKind::BiometricEnrollment
    }
}

#[async_trait]
impl BiometricEnrollment for FakeEnrollment {
    async fn is_enrolled(&self) -> Result<bool, VaultgateError> {
        self.calls.record();
        pause(self.delay).await;
        if let Some(message) = self.fault.fire() {
            return Err(VaultgateError::enrollment(message));
        }
        Ok(*lock(&self.enrolled))
    }
}
