// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Vaultgate integration tests.
//!
//! Provides in-memory fakes for every collaborator and a harness that wires
//! them together, for fast, deterministic tests without touching the device.
//!
//! # Components
//!
//! - [`FakeVault`], [`FakeCredentialStore`], [`FakeKeyValueStore`],
//!   [`FakeEnrollment`] - Store fakes with fault injection and call counters
//! - [`FakeAssetPreloader`], [`FakeFontPreloader`] - Preload fakes with delays
//! - [`TestHarness`] - All fakes plus a config, ready to hand to a bootstrap

mod fault;
pub mod fake_preload;
pub mod fake_stores;
pub mod harness;

pub use fake_preload::{FakeAssetPreloader, FakeFontPreloader};
pub use fake_stores::{FakeCredentialStore, FakeEnrollment, FakeKeyValueStore, FakeVault};
pub use harness::{TestHarness, TestHarnessBuilder};
