// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Image and font preloading from the asset directory.

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;
use vaultgate_core::{
    AssetPreloader, AssetRef, Collaborator, CollaboratorKind, FontMap, FontPreloader,
    VaultgateError,
};

/// sfnt and WOFF signatures accepted for font files.
const FONT_SIGNATURES: [&[u8; 4]; 6] = [
    &[0x00, 0x01, 0x00, 0x00],
    b"OTTO",
    b"true",
    b"ttcf",
    b"wOFF",
    b"wOF2",
];

async fn read_resource(resource: &AssetRef) -> Result<Vec<u8>, VaultgateError> {
    let bytes = tokio::fs::read(Path::new(resource.as_str()))
        .await
        .map_err(|e| VaultgateError::AssetLoad {
            resource: resource.to_string(),
            message: e.to_string(),
            source: Some(Box::new(e)),
        })?;
    if bytes.is_empty() {
        return Err(VaultgateError::asset(resource.as_str(), "file is empty"));
    }
    Ok(bytes)
}

/// Requires every image to be a readable, non-empty file.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileAssetPreloader;

impl Collaborator for FileAssetPreloader {
    fn name(&self) -> &str {
        "file-assets"
    }

    fn kind(&self) -> CollaboratorKind {
        CollaboratorKind::AssetPreloader
    }
}

#[async_trait]
impl AssetPreloader for FileAssetPreloader {
    async fn load(&self, resources: &[AssetRef]) -> Result<(), VaultgateError> {
        let mut total = 0;
        for resource in resources {
            total += read_resource(resource).await?.len();
        }
        debug!(images = resources.len(), bytes = total, "images preloaded");
        Ok(())
    }
}

/// Requires every font file to carry a TrueType, OpenType, or WOFF signature.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFontPreloader;

impl Collaborator for FileFontPreloader {
    fn name(&self) -> &str {
        "file-fonts"
    }

    fn kind(&self) -> CollaboratorKind {
        CollaboratorKind::FontPreloader
    }
}

#[async_trait]
impl FontPreloader for FileFontPreloader {
    async fn load(&self, fonts: &FontMap) -> Result<(), VaultgateError> {
        for (family, file) in fonts {
            let bytes = read_resource(file).await?;
            let recognized = bytes
                .get(..4)
                .is_some_and(|magic| FONT_SIGNATURES.iter().any(|sig| magic == sig.as_slice()));
            if !recognized {
                return Err(VaultgateError::asset(
                    file.as_str(),
                    format!("font `{family}` has no TrueType, OpenType, or WOFF signature"),
                ));
            }
            debug!(family = %family, path = %file, "font preloaded");
        }
        Ok(())
    }
}
