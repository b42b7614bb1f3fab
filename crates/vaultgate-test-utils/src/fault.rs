// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fault injection and latency shared by every fake.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug)]
struct Armed {
    message: String,
    /// `None` fails forever.
    remaining: Option<u32>,
}

/// A switchable failure for one fake operation.
#[derive(Debug, Default)]
pub(crate) struct Fault {
    armed: Mutex<Option<Armed>>,
}

impl Fault {
    pub(crate) fn always(&self, message: impl Into<String>) {
        *lock(&self.armed) = Some(Armed {
            message: message.into(),
            remaining: None,
        });
    }

    pub(crate) fn times(&self, count: u32, message: impl Into<String>) {
        *lock(&self.armed) = (count > 0).then(|| Armed {
            message: message.into(),
            remaining: Some(count),
        });
    }

    pub(crate) fn clear(&self) {
        *lock(&self.armed) = None;
    }

    /// The failure message for this call, if the fault fires.
    pub(crate) fn fire(&self) -> Option<String> {
        let mut armed = lock(&self.armed);
        let current = armed.as_mut()?;
        let message = current.message.clone();
        if let Some(remaining) = current.remaining.as_mut() {
            *remaining -= 1;
            if *remaining == 0 {
                *armed = None;
            }
        }
        Some(message)
    }
}

/// Per-operation call counter.
#[derive(Debug, Default)]
pub(crate) struct Calls(AtomicU32);

impl Calls {
    pub(crate) fn record(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn get(&self) -> u32 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Simulated latency. A zero delay never yields to the runtime.
pub(crate) async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counted_fault_disarms_itself() {
        let fault = Fault::default();
        fault.times(2, "busy");
        assert_eq!(fault.fire().as_deref(), Some("busy"));
        assert_eq!(fault.fire().as_deref(), Some("busy"));
        assert_eq!(fault.fire(), None);
    }

    #[test]
    fn permanent_fault_fires_until_cleared() {
        let fault = Fault::default();
        fault.always("down");
        for _ in 0..5 {
            assert!(fault.fire().is_some());
        }
        fault.clear();
        assert_eq!(fault.fire(), None);
    }
}
