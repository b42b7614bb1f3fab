// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Biometric enrollment query.

use async_trait::async_trait;

use crate::error::VaultgateError;
use crate::traits::collaborator::Collaborator;

/// Reports whether the device currently has biometrics enrolled.
///
/// Enrollment can change outside the app at any time, so callers must not
/// cache the answer across launches.
#[async_trait]
pub trait BiometricEnrollment: Collaborator {
    async fn is_enrolled(&self) -> Result<bool, VaultgateError>;
}
