// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generic key-value preference storage.

use async_trait::async_trait;

use crate::error::VaultgateError;
use crate::traits::collaborator::Collaborator;

/// Unencrypted key-value store for user preferences.
#[async_trait]
pub trait KeyValueStore: Collaborator {
    /// Returns the raw value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, VaultgateError>;

    /// Removes every stored preference.
    async fn clear(&self) -> Result<(), VaultgateError>;
}
