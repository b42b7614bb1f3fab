// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-writer owner of the navigation phase.
//!
//! The authentication flow holds the [`VaultPhaseCell`] and is the only code
//! that can move the app from `PreVault` to `PostVault`. Everything else gets
//! a read-only [`PhaseReceiver`]. The transition is one-directional: there is
//! no API to return to `PreVault`.

use tokio::sync::watch;
use tracing::info;
use vaultgate_core::NavigationPhase;

/// Writer side of the navigation phase.
#[derive(Debug)]
pub struct VaultPhaseCell {
    tx: watch::Sender<NavigationPhase>,
}

impl VaultPhaseCell {
    /// Create a cell starting in `PreVault`.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(NavigationPhase::PreVault);
        Self { tx }
    }

    /// Hand out a read-only view of the phase.
    pub fn subscribe(&self) -> PhaseReceiver {
        PhaseReceiver {
            rx: self.tx.subscribe(),
        }
    }

    /// The current phase.
    pub fn phase(&self) -> NavigationPhase {
        *self.tx.borrow()
    }

    /// Record that the vault has been unlocked.
    ///
    /// Returns `true` if this call performed the `PreVault -> PostVault`
    /// transition, `false` if the vault was already unlocked.
    pub fn mark_unlocked(&self) -> bool {
        let changed = self.tx.send_if_modified(|phase| {
            if *phase == NavigationPhase::PreVault {
                *phase = NavigationPhase::PostVault;
                true
            } else {
                false
            }
        });
        if changed {
            info!("vault unlocked -- switching to post-vault navigation");
        }
        changed
    }
}

impl Default for VaultPhaseCell {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of the navigation phase.
#[derive(Debug, Clone)]
pub struct PhaseReceiver {
    rx: watch::Receiver<NavigationPhase>,
}

impl PhaseReceiver {
    /// The phase as last published by the cell.
    pub fn current(&self) -> NavigationPhase {
        *self.rx.borrow()
    }

    /// Wait until the vault is unlocked.
    ///
    /// Returns `false` if the cell was dropped while still in `PreVault`.
    pub async fn unlocked(&mut self) -> bool {
        self.rx
            .wait_for(|phase| *phase == NavigationPhase::PostVault)
            .await
            .is_ok()
    }
}
