// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base trait that all collaborators implement.

use crate::types::CollaboratorKind;

/// Identity shared by every external collaborator.
///
/// The bootstrap uses these to label log events and failures; the actual
/// operations live on the specific collaborator traits.
pub trait Collaborator: Send + Sync + 'static {
    /// Returns the human-readable name of this collaborator instance.
    fn name(&self) -> &str;

    /// Returns which contract this collaborator fulfils.
    fn kind(&self) -> CollaboratorKind;
}
