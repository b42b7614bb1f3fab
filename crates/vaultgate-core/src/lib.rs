// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Vaultgate bootstrap.
//!
//! This crate provides the collaborator trait definitions, error types, and
//! common types used throughout the Vaultgate workspace. Device adapters and
//! test fakes implement the traits defined here.

pub mod collaborators;
pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use collaborators::Collaborators;
pub use error::VaultgateError;
pub use types::{
    AssetRef, BootstrapErrorKind, CollaboratorKind, FontMap, NavigationPhase, Screen,
    SettingsSnapshot, StoreKind,
};

// Re-export all collaborator traits at crate root.
pub use traits::{
    AssetPreloader, BiometricEnrollment, Collaborator, CredentialStore, FontPreloader,
    KeyValueStore, VaultExistence,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds_round_trip_through_display() {
        use std::str::FromStr;

        let kinds = [
            BootstrapErrorKind::StoreAccess,
            BootstrapErrorKind::EnrollmentQuery,
            BootstrapErrorKind::AssetLoad,
            BootstrapErrorKind::Timeout,
            BootstrapErrorKind::Reset,
        ];

        for kind in &kinds {
            let s = kind.to_string();
            let parsed = BootstrapErrorKind::from_str(&s).expect("should parse back");
            assert_eq!(*kind, parsed);
        }
        assert_eq!(BootstrapErrorKind::StoreAccess.to_string(), "store_access");
    }

    #[test]
    fn phases_partition_the_screens() {
        for screen in Screen::PRE_VAULT {
            assert_eq!(screen.phase(), NavigationPhase::PreVault);
            assert!(!NavigationPhase::PostVault.screens().contains(&screen));
        }
        for screen in Screen::POST_VAULT {
            assert_eq!(screen.phase(), NavigationPhase::PostVault);
            assert!(!NavigationPhase::PreVault.screens().contains(&screen));
        }
        assert_eq!(NavigationPhase::PostVault.root(), Screen::Home);
    }

    #[test]
    fn settings_snapshot_serialization() {
        let snapshot = SettingsSnapshot {
            biometric_unlock: true,
            conceal_tokens: false,
        };
        let json = serde_json::to_string(&snapshot).expect("should serialize");
        assert_eq!(json, r#"{"biometric_unlock":true,"conceal_tokens":false}"#);
        let parsed: SettingsSnapshot = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(snapshot, parsed);
    }

    #[test]
    fn all_traits_are_object_safe() {
        // Fails to compile if any collaborator trait stops being usable as `dyn`.
        fn _vault(_: &dyn VaultExistence) {}
        fn _credentials(_: &dyn CredentialStore) {}
        fn _preferences(_: &dyn KeyValueStore) {}
        fn _enrollment(_: &dyn BiometricEnrollment) {}
        fn _assets(_: &dyn AssetPreloader) {}
        fn _fonts(_: &dyn FontPreloader) {}
    }
}
