use chrono::NaiveDate;

use crate::models::analytics::{BudgetStatus, DashboardStats};
use crate::models::bill::Bill;
use crate::models::query::same_month;

/// Computes dashboard figures over the bill history.
///
/// All functions are single passes over `bills`; nothing is cached.
pub struct AnalyticsService;

impl AnalyticsService {
    pub fn new() -> Self {
        Self
    }

    /// Bill count, total, average, and the current month's total.
    /// An empty history yields all zeros.
    pub fn aggregate(&self, bills: &[Bill], today: NaiveDate) -> DashboardStats {
        let bill_count = bills.len();
        let total_expense: f64 = bills.iter().map(|b| b.total).sum();
        let average_bill_amount = if bill_count > 0 {
            total_expense / bill_count as f64
        } else {
            0.0
        };

        DashboardStats {
            bill_count,
            total_expense,
            average_bill_amount,
            current_month_total: self.month_total(bills, today),
        }
    }

    /// Σ bill.total for bills created in the same calendar month as `today`.
    pub fn month_total(&self, bills: &[Bill], today: NaiveDate) -> f64 {
        bills
            .iter()
            .filter(|b| same_month(b.created_at.date(), today))
            .map(|b| b.total)
            .sum()
    }

    /// Progress against a monthly budget, or `None` when no budget is set.
    pub fn budget_status(
        &self,
        bills: &[Bill],
        monthly_budget: Option<f64>,
        today: NaiveDate,
    ) -> Option<BudgetStatus> {
        let budget = monthly_budget?;
        Some(BudgetStatus::new(budget, self.month_total(bills, today)))
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}
