// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the collaborator traits, the bootstrap, and the
//! rendering layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifies which external store an operation touched.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    Vault,
    Credential,
    Preferences,
}

/// Identifies the kind of collaborator behind a trait object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CollaboratorKind {
    VaultExistence,
    CredentialStore,
    KeyValueStore,
    BiometricEnrollment,
    AssetPreloader,
    FontPreloader,
}

/// Failure taxonomy surfaced by a failed bootstrap.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BootstrapErrorKind {
    /// Read, write, or delete failure on any external store.
    StoreAccess,
    /// Platform biometric query failure.
    EnrollmentQuery,
    /// Resource decode or IO failure.
    AssetLoad,
    /// A load did not finish within the configured bound.
    Timeout,
    /// A reset step failed under the halting reset policy.
    Reset,
}

/// Settings derived during bootstrap and handed to the rest of the app as one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SettingsSnapshot {
    /// A stored unlock credential exists and enrollment was present when it was checked.
    pub biometric_unlock: bool,
    /// Whether OTP tokens are hidden until tapped.
    pub conceal_tokens: bool,
}

/// Top-level navigation phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum NavigationPhase {
    /// Vault not yet unlocked: setup and unlock screens only.
    PreVault,
    /// Vault unlocked: application screens only.
    PostVault,
}

/// Every screen the rendering layer can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum Screen {
    Welcome,
    AuthenticationSetup,
    Authentication,
    Home,
    Sorting,
    BarcodeScanner,
    Settings,
}

impl Screen {
    /// Screens reachable before the vault is unlocked.
    pub const PRE_VAULT: [Screen; 3] = [
        Screen::Welcome,
        Screen::AuthenticationSetup,
        Screen::Authentication,
    ];

    /// Screens reachable once the vault is unlocked.
    pub const POST_VAULT: [Screen; 4] = [
        Screen::Home,
        Screen::Sorting,
        Screen::BarcodeScanner,
        Screen::Settings,
    ];

    /// The phase whose subgraph contains this screen.
    pub fn phase(self) -> NavigationPhase {
        match self {
            Screen::Welcome | Screen::AuthenticationSetup | Screen::Authentication => {
                NavigationPhase::PreVault
            }
            Screen::Home | Screen::Sorting | Screen::BarcodeScanner | Screen::Settings => {
                NavigationPhase::PostVault
            }
        }
    }
}

impl NavigationPhase {
    /// The full screen set of this phase's subgraph.
    pub fn screens(self) -> &'static [Screen] {
        match self {
            NavigationPhase::PreVault => &Screen::PRE_VAULT,
            NavigationPhase::PostVault => &Screen::POST_VAULT,
        }
    }

    /// The screen a freshly swapped-in subgraph starts on.
    ///
    /// Only meaningful for `PostVault`; the pre-vault root is chosen by
    /// vault presence at bootstrap.
    pub fn root(self) -> Screen {
        match self {
            NavigationPhase::PreVault => Screen::Welcome,
            NavigationPhase::PostVault => Screen::Home,
        }
    }
}

/// Path of an image or font resource, already resolved against the asset root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(pub String);

impl AssetRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AssetRef {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for AssetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Font family name to resource mapping.
pub type FontMap = BTreeMap<String, AssetRef>;
