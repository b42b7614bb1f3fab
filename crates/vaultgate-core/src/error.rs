// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Vaultgate bootstrap.

use std::time::Duration;

use thiserror::Error;

use crate::types::{BootstrapErrorKind, StoreKind};

/// The primary error type returned by every collaborator and bootstrap step.
#[derive(Debug, Error)]
pub enum VaultgateError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Read, write, or delete failure on one of the external stores.
    #[error("{store} store {operation} failed: {source}")]
    StoreAccess {
        store: StoreKind,
        operation: &'static str,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The platform biometric enrollment query failed.
    #[error("biometric enrollment query failed: {source}")]
    EnrollmentQuery {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An image or font resource could not be read or decoded.
    #[error("failed to load asset `{resource}`: {message}")]
    AssetLoad {
        resource: String,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl VaultgateError {
    /// Shorthand for a [`StoreAccess`](Self::StoreAccess) error.
    pub fn store(
        store: StoreKind,
        operation: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::StoreAccess {
            store,
            operation,
            source: source.into(),
        }
    }

    /// Shorthand for an [`EnrollmentQuery`](Self::EnrollmentQuery) error.
    pub fn enrollment(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::EnrollmentQuery {
            source: source.into(),
        }
    }

    /// Shorthand for an [`AssetLoad`](Self::AssetLoad) error without an underlying cause.
    pub fn asset(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AssetLoad {
            resource: resource.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Maps this error onto the bootstrap failure taxonomy.
    ///
    /// Returns `None` for errors that never originate from a bootstrap load
    /// (configuration and internal errors).
    pub fn kind(&self) -> Option<BootstrapErrorKind> {
        match self {
            Self::StoreAccess { .. } => Some(BootstrapErrorKind::StoreAccess),
            Self::EnrollmentQuery { .. } => Some(BootstrapErrorKind::EnrollmentQuery),
            Self::AssetLoad { .. } => Some(BootstrapErrorKind::AssetLoad),
            Self::Timeout { .. } => Some(BootstrapErrorKind::Timeout),
            Self::Config(_) | Self::Internal(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_names_store_and_operation() {
        let err = VaultgateError::store(
            StoreKind::Credential,
            "remove",
            std::io::Error::other("keychain locked"),
        );
        assert_eq!(
            err.to_string(),
            "credential store remove failed: keychain locked"
        );
        assert_eq!(err.kind(), Some(BootstrapErrorKind::StoreAccess));
    }

    #[test]
    fn taxonomy_mapping() {
        assert_eq!(
            VaultgateError::enrollment(std::io::Error::other("x")).kind(),
            Some(BootstrapErrorKind::EnrollmentQuery)
        );
        assert_eq!(
            VaultgateError::asset("logo.png", "empty file").kind(),
            Some(BootstrapErrorKind::AssetLoad)
        );
        assert_eq!(
            VaultgateError::Timeout {
                duration: Duration::from_secs(1)
            }
            .kind(),
            Some(BootstrapErrorKind::Timeout)
        );
        assert_eq!(VaultgateError::Config("bad".into()).kind(), None);
        assert_eq!(VaultgateError::Internal("bug".into()).kind(), None);
    }
}
