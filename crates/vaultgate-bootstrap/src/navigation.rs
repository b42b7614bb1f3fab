// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Navigation state machine.
//!
//! Two mutually exclusive subgraphs: pre-vault (`Welcome`,
//! `AuthenticationSetup`, `Authentication`) and post-vault (`Home`,
//! `Sorting`, `BarcodeScanner`, `Settings`). The landing screen inside the
//! pre-vault subgraph is chosen once from vault presence at bootstrap. The
//! switch to the post-vault subgraph is driven solely by the
//! [`PhaseReceiver`] and replaces the whole stack.

use serde::Serialize;
use strum::Display;
use thiserror::Error;
use tracing::{debug, info};
use vaultgate_core::{NavigationPhase, Screen};

use crate::phase::PhaseReceiver;
use crate::readiness::BootstrapOutcome;

/// Landing screen inside the pre-vault subgraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum InitialRoute {
    Authentication,
    Welcome,
}

impl InitialRoute {
    /// `Authentication` when a vault already exists, `Welcome` otherwise.
    pub fn select(vault_present: bool) -> Self {
        if vault_present {
            InitialRoute::Authentication
        } else {
            InitialRoute::Welcome
        }
    }

    pub fn screen(self) -> Screen {
        match self {
            InitialRoute::Authentication => Screen::Authentication,
            InitialRoute::Welcome => Screen::Welcome,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("screen {screen} is not reachable while in {phase}")]
    Unreachable {
        screen: Screen,
        phase: NavigationPhase,
    },
}

/// Screen stack confined to the subgraph of the current phase.
///
/// The only public constructor is [`Navigator::from_outcome`]; a route
/// cannot be built without a successful bootstrap:
///
/// ```compile_fail
/// use vaultgate_bootstrap::{InitialRoute, Navigator, VaultPhaseCell};
///
/// let cell = VaultPhaseCell::new();
/// let _ = Navigator::new(InitialRoute::Welcome, cell.subscribe());
/// ```
#[derive(Debug)]
pub struct Navigator {
    initial: InitialRoute,
    phase: NavigationPhase,
    receiver: PhaseReceiver,
    stack: Vec<Screen>,
}

impl Navigator {
    pub(crate) fn new(initial: InitialRoute, receiver: PhaseReceiver) -> Self {
        let mut navigator = Self {
            initial,
            phase: NavigationPhase::PreVault,
            receiver,
            stack: vec![initial.screen()],
        };
        navigator.sync();
        navigator
    }

    /// Build the navigator for a successful bootstrap.
    ///
    /// Only a [`BootstrapOutcome`] can produce a route, so nothing is
    /// navigable while loading or after a failed bootstrap.
    pub fn from_outcome(outcome: &BootstrapOutcome, receiver: PhaseReceiver) -> Self {
        Self::new(outcome.initial_route(), receiver)
    }

    /// The landing screen chosen at bootstrap. Never re-evaluated.
    pub fn initial_route(&self) -> InitialRoute {
        self.initial
    }

    pub fn phase(&mut self) -> NavigationPhase {
        self.sync();
        self.phase
    }

    pub fn current(&mut self) -> Screen {
        self.sync();
        *self.stack.last().unwrap_or(&self.phase.root())
    }

    /// Every screen of the current subgraph.
    pub fn reachable(&mut self) -> &'static [Screen] {
        self.sync();
        self.phase.screens()
    }

    pub fn stack(&mut self) -> &[Screen] {
        self.sync();
        &self.stack
    }

    /// Push `screen` if it belongs to the current subgraph.
    pub fn navigate(&mut self, screen: Screen) -> Result<(), NavigationError> {
        self.sync();
        if screen.phase() != self.phase {
            return Err(NavigationError::Unreachable {
                screen,
                phase: self.phase,
            });
        }
        if self.stack.last() != Some(&screen) {
            self.stack.push(screen);
            debug!(screen = %screen, "navigated");
        }
        Ok(())
    }

    /// Pop the top screen. The root of the subgraph is never popped.
    pub fn back(&mut self) -> bool {
        self.sync();
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    /// Wait for the vault to be unlocked, then swap to the post-vault subgraph.
    ///
    /// Returns `false` if the phase cell was dropped before unlocking.
    pub async fn wait_for_unlock(&mut self) -> bool {
        if !self.receiver.unlocked().await {
            return false;
        }
        self.sync();
        true
    }

    fn sync(&mut self) {
        let observed = self.receiver.current();
        if observed == self.phase {
            return;
        }
        // Only PreVault -> PostVault exists; the cell has no way back.
        self.phase = observed;
        self.stack = vec![observed.root()];
        info!(phase = %observed, "navigation subgraph swapped");
    }
}
