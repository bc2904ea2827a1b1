use serde::{Deserialize, Serialize};

use super::bill::{Bill, LineItem};

/// All state owned by the ledger.
///
/// Only `bills` is ever persisted. The draft lives for the session and is
/// skipped by serde so a snapshot of the state never leaks it to storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerState {
    /// Items entered but not yet turned into a bill
    #[serde(skip)]
    pub draft_items: Vec<LineItem>,

    /// Committed bills, oldest first (insertion order)
    pub bills: Vec<Bill>,
}

impl LedgerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bills(bills: Vec<Bill>) -> Self {
        Self {
            draft_items: Vec::new(),
            bills,
        }
    }
}
