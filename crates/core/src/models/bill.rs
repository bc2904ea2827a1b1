use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::{Category, PaymentMethod};

/// A single entry in the draft (and, once committed, in a bill).
///
/// `line_total` is derived from `unit_price * quantity` at construction
/// and carried along so receipts and exports never recompute it differently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Unique identifier within the draft
    pub id: Uuid,

    /// Product name (trimmed, never empty)
    pub name: String,

    /// Price of one unit (positive, finite)
    pub unit_price: f64,

    /// Number of units (at least 1)
    pub quantity: u32,

    pub category: Category,

    pub payment_method: PaymentMethod,

    /// unit_price × quantity
    pub line_total: f64,
}

impl LineItem {
    /// Build a line item without validation. Use `LedgerService::add_item`
    /// to get the validated path.
    pub fn new(
        name: impl Into<String>,
        unit_price: f64,
        quantity: u32,
        category: Category,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            unit_price,
            quantity,
            category,
            payment_method,
            line_total: unit_price * f64::from(quantity),
        }
    }
}

/// A committed, immutable bill.
///
/// **Invariant**: `total == Σ items[i].line_total`. The total is computed
/// once in `Bill::new` and never edited independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    /// Unique identifier across all bills
    pub id: Uuid,

    /// Local wall-clock time at which the bill was generated
    pub created_at: NaiveDateTime,

    /// Snapshot of the draft at commit time
    pub items: Vec<LineItem>,

    /// Grand total
    pub total: f64,
}

impl Bill {
    pub fn new(items: Vec<LineItem>, created_at: NaiveDateTime) -> Self {
        let total = sum_line_totals(&items);
        Self {
            id: Uuid::new_v4(),
            created_at,
            items,
            total,
        }
    }

    /// Total recomputed from the items, ignoring the stored `total`.
    pub fn recomputed_total(&self) -> f64 {
        sum_line_totals(&self.items)
    }

    /// Total number of units across all items.
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

pub(crate) fn sum_line_totals(items: &[LineItem]) -> f64 {
    items.iter().map(|i| i.line_total).sum()
}
