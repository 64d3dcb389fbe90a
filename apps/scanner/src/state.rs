//! # Ledger State
//!
//! Shared ownership wrapper around the ledger.
//!
//! ## Thread Safety
//! The ledger is wrapped in `Arc<Mutex<T>>` because:
//! 1. The capture loop and user-initiated operations may run on
//!    different tasks
//! 2. Only one operation may mutate the ledger at a time
//! 3. Every mutation runs to completion inside the lock; no operation
//!    suspends mid-mutation, so no caller ever observes partial state
//!
//! ## Why Not RwLock?
//! Ledger operations are quick and most of them mutate. A RwLock would
//! add complexity with minimal benefit.

use std::sync::{Arc, Mutex};

use scanledger_core::Ledger;

/// Shared ledger state.
///
/// ## Explicit Ownership
/// This handle is passed to whichever layer needs the ledger; there is no
/// ambient global cart. Cloning the handle shares the same ledger.
#[derive(Debug, Clone, Default)]
pub struct LedgerState {
    ledger: Arc<Mutex<Ledger>>,
}

impl LedgerState {
    /// Creates state around an empty ledger.
    pub fn new() -> Self {
        LedgerState::default()
    }

    /// Creates state around a rehydrated ledger.
    pub fn with_ledger(ledger: Ledger) -> Self {
        LedgerState {
            ledger: Arc::new(Mutex::new(ledger)),
        }
    }

    /// Executes a function with read access to the ledger.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let total = state.read(|ledger| ledger.total());
    /// ```
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Ledger) -> R,
    {
        let ledger = self.ledger.lock().expect("Ledger mutex poisoned");
        f(&ledger)
    }

    /// Executes a function with write access to the ledger.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// state.write(|ledger| ledger.remove_item(&id));
    /// ```
    pub fn write<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Ledger) -> R,
    {
        let mut ledger = self.ledger.lock().expect("Ledger mutex poisoned");
        f(&mut ledger)
    }
}
