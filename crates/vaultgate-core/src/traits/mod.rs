// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions consumed by the bootstrap.
//!
//! Every collaborator extends the [`Collaborator`] base trait and uses
//! `#[async_trait]` so the bootstrap can hold them as trait objects.

pub mod assets;
pub mod biometric;
pub mod collaborator;
pub mod credential;
pub mod preferences;
pub mod vault;

pub use assets::{AssetPreloader, FontPreloader};
pub use biometric::BiometricEnrollment;
pub use collaborator::Collaborator;
pub use credential::CredentialStore;
pub use preferences::KeyValueStore;
pub use vault::VaultExistence;
