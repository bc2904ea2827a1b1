use serde::{Deserialize, Serialize};

/// Dashboard summary over the whole bill history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Number of bills ever generated (and not deleted)
    pub bill_count: usize,

    /// Σ bill.total
    pub total_expense: f64,

    /// total_expense / bill_count, or 0 when there are no bills
    pub average_bill_amount: f64,

    /// Σ bill.total for bills created in the current calendar month
    pub current_month_total: f64,
}

/// Progress against the user's monthly budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    /// Configured monthly budget
    pub budget: f64,

    /// Spent in the current calendar month
    pub spent: f64,

    /// budget - spent (negative when over budget)
    pub remaining: f64,

    /// (spent / budget) * 100
    pub percent_used: f64,

    pub over_budget: bool,
}

impl BudgetStatus {
    pub fn new(budget: f64, spent: f64) -> Self {
        let percent_used = if budget > 0.0 {
            (spent / budget) * 100.0
        } else {
            0.0
        };
        Self {
            budget,
            spent,
            remaining: budget - spent,
            percent_used,
            over_budget: spent > budget,
        }
    }
}
