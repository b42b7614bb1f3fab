// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Image and font preloading traits. Both are opaque pass/fail.

use async_trait::async_trait;

use crate::error::VaultgateError;
use crate::traits::collaborator::Collaborator;
use crate::types::{AssetRef, FontMap};

/// Loads image resources ahead of the first render.
#[async_trait]
pub trait AssetPreloader: Collaborator {
    async fn load(&self, resources: &[AssetRef]) -> Result<(), VaultgateError>;
}

/// Loads font families ahead of the first render.
#[async_trait]
pub trait FontPreloader: Collaborator {
    async fn load(&self, fonts: &FontMap) -> Result<(), VaultgateError>;
}
