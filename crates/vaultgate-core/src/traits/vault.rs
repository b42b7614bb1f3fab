// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vault existence trait. Only the vault's presence matters here, never its contents.

use async_trait::async_trait;

use crate::error::VaultgateError;
use crate::traits::collaborator::Collaborator;

/// Checks for and deletes the on-device vault.
#[async_trait]
pub trait VaultExistence: Collaborator {
    /// Returns whether a vault currently exists on the device.
    async fn exists(&self) -> Result<bool, VaultgateError>;

    /// Deletes the vault. Deleting an absent vault is not an error.
    async fn delete(&self) -> Result<(), VaultgateError>;
}
