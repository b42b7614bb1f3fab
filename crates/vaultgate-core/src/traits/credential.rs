// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secure credential store trait for the single biometric unlock secret.

use async_trait::async_trait;
use secrecy::SecretString;

use crate::error::VaultgateError;
use crate::traits::collaborator::Collaborator;

/// Platform-backed store holding one opaque unlock credential.
///
/// The bootstrap only observes presence and may command removal; it never
/// inspects or logs the secret itself.
#[async_trait]
pub trait CredentialStore: Collaborator {
    /// Returns the stored credential, if any.
    async fn get(&self) -> Result<Option<SecretString>, VaultgateError>;

    /// Removes the stored credential. Idempotent: removing nothing succeeds.
    async fn remove(&self) -> Result<(), VaultgateError>;
}
