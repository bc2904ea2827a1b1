use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashSet;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::bill::{sum_line_totals, Bill, LineItem};
use crate::models::category::{Category, PaymentMethod};
use crate::models::ledger::LedgerState;
use crate::models::query::BillQuery;

/// Manages the draft and the bill list.
///
/// Pure business logic: no I/O, no clock. Persistence and timestamps are
/// supplied by the `BillLedger` facade.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Validate input and append a new item to the draft.
    ///
    /// Rules:
    /// - Name must contain something other than whitespace
    /// - Unit price must be positive and finite
    /// - Quantity must be at least 1
    /// - Line total and the resulting draft total must stay finite
    pub fn add_item(
        &self,
        state: &mut LedgerState,
        name: &str,
        unit_price: f64,
        quantity: u32,
        category: Category,
        payment_method: PaymentMethod,
    ) -> Result<LineItem, CoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::ValidationError(
                "Item name must not be empty".into(),
            ));
        }
        if !unit_price.is_finite() || unit_price <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Unit price must be a positive number, got {unit_price}"
            )));
        }
        if quantity == 0 {
            return Err(CoreError::ValidationError(
                "Quantity must be at least 1".into(),
            ));
        }
        let line_total = unit_price * f64::from(quantity);
        if !line_total.is_finite() {
            return Err(CoreError::ValidationError(format!(
                "Line total for '{name}' is too large"
            )));
        }
        if !(self.draft_total(state) + line_total).is_finite() {
            return Err(CoreError::ValidationError(
                "Draft total would be too large".into(),
            ));
        }

        let mut item = LineItem::new(name, unit_price, quantity, category, payment_method);
        // ids are unique within the draft
        while state.draft_items.iter().any(|i| i.id == item.id) {
            item.id = Uuid::new_v4();
        }
        state.draft_items.push(item.clone());
        Ok(item)
    }

    /// Remove a draft item by id. Returns `false` if no such item exists.
    pub fn remove_item(&self, state: &mut LedgerState, item_id: Uuid) -> bool {
        let before = state.draft_items.len();
        state.draft_items.retain(|i| i.id != item_id);
        state.draft_items.len() != before
    }

    pub fn clear_draft(&self, state: &mut LedgerState) {
        state.draft_items.clear();
    }

    /// Σ line_total over the current draft.
    pub fn draft_total(&self, state: &LedgerState) -> f64 {
        sum_line_totals(&state.draft_items)
    }

    /// Build a bill from a deep copy of the draft. Does not touch `state`;
    /// the caller appends it once it knows the bill can be persisted.
    pub fn build_bill(&self, state: &LedgerState, created_at: NaiveDateTime) -> Result<Bill, CoreError> {
        if state.draft_items.is_empty() {
            return Err(CoreError::EmptyDraft);
        }
        let mut bill = Bill::new(state.draft_items.clone(), created_at);
        if !bill.total.is_finite() {
            return Err(CoreError::ValidationError("Bill total is too large".into()));
        }
        while state.bills.iter().any(|b| b.id == bill.id) {
            bill.id = Uuid::new_v4();
        }
        Ok(bill)
    }

    /// Remove a bill by id, returning it together with its former index so
    /// the removal can be rolled back.
    pub fn take_bill(&self, state: &mut LedgerState, bill_id: Uuid) -> Option<(usize, Bill)> {
        let idx = state.bills.iter().position(|b| b.id == bill_id)?;
        Some((idx, state.bills.remove(idx)))
    }

    /// Bills matching `query`, most recent first. Lazy: nothing is
    /// collected until the caller iterates.
    pub fn query_bills<'a>(
        &self,
        state: &'a LedgerState,
        query: &'a BillQuery,
        today: NaiveDate,
    ) -> impl Iterator<Item = &'a Bill> + 'a {
        // internal storage is oldest-first; reverse for newest-first
        state
            .bills
            .iter()
            .rev()
            .filter(move |b| query.matches(b, today))
    }

    /// Validate bills read from an import before they are appended.
    ///
    /// Totals are recomputed from the items, ids must be unique both among
    /// the incoming bills and against existing ones, and every item must
    /// satisfy the same rules as `add_item`. Returns the bills sorted
    /// oldest-first.
    pub fn prepare_import(&self, state: &LedgerState, bills: Vec<Bill>) -> Result<Vec<Bill>, CoreError> {
        let mut seen: HashSet<Uuid> = state.bills.iter().map(|b| b.id).collect();
        let mut prepared = Vec::with_capacity(bills.len());

        for mut bill in bills {
            if !seen.insert(bill.id) {
                return Err(CoreError::ValidationError(format!(
                    "Duplicate bill id {} in import",
                    bill.id
                )));
            }
            if bill.items.is_empty() {
                return Err(CoreError::ValidationError(format!(
                    "Bill {} has no items",
                    bill.id
                )));
            }
            for item in &mut bill.items {
                if item.name.trim().is_empty()
                    || !item.unit_price.is_finite()
                    || item.unit_price <= 0.0
                    || item.quantity == 0
                {
                    return Err(CoreError::ValidationError(format!(
                        "Bill {} contains an invalid item '{}'",
                        bill.id, item.name
                    )));
                }
                item.line_total = item.unit_price * f64::from(item.quantity);
                if !item.line_total.is_finite() {
                    return Err(CoreError::ValidationError(format!(
                        "Bill {} has an item total that is too large",
                        bill.id
                    )));
                }
            }
            bill.total = bill.recomputed_total();
            if !bill.total.is_finite() {
                return Err(CoreError::ValidationError(format!(
                    "Bill {} has a total that is too large",
                    bill.id
                )));
            }
            prepared.push(bill);
        }

        // stable: bills sharing a timestamp keep their file order
        prepared.sort_by_key(|b| b.created_at);
        Ok(prepared)
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
