use std::collections::BTreeMap;

use crate::models::bill::Bill;
use crate::models::category::Category;
use crate::models::chart::PeriodTotal;

/// Generates chart-ready data sets from the bill history.
///
/// The core computes all the numbers; the frontend only renders.
/// - Per-category sums (pie / doughnut)
/// - Per-category averages (radar)
/// - Monthly totals (bar)
/// - Cumulative daily totals (line)
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Σ line_total of every item across all bills, grouped by category.
    /// Categories with no items are absent.
    pub fn by_category(&self, bills: &[Bill]) -> BTreeMap<Category, f64> {
        let mut totals = BTreeMap::new();
        for item in bills.iter().flat_map(|b| &b.items) {
            *totals.entry(item.category).or_insert(0.0) += item.line_total;
        }
        totals
    }

    /// Average line_total per item, grouped by category.
    pub fn average_by_category(&self, bills: &[Bill]) -> BTreeMap<Category, f64> {
        let mut sums: BTreeMap<Category, (f64, usize)> = BTreeMap::new();
        for item in bills.iter().flat_map(|b| &b.items) {
            let entry = sums.entry(item.category).or_insert((0.0, 0));
            entry.0 += item.line_total;
            entry.1 += 1;
        }
        sums.into_iter()
            .map(|(category, (sum, count))| (category, sum / count as f64))
            .collect()
    }

    /// Σ bill.total per creation month (`YYYY-MM`), oldest month first.
    pub fn by_month(&self, bills: &[Bill]) -> Vec<PeriodTotal> {
        Self::group_totals(bills, "%Y-%m")
    }

    /// Running total of daily spending (`YYYY-MM-DD`), oldest day first.
    /// Each entry includes every bill up to and including that day.
    pub fn cumulative_by_day(&self, bills: &[Bill]) -> Vec<PeriodTotal> {
        let mut running = 0.0;
        Self::group_totals(bills, "%Y-%m-%d")
            .into_iter()
            .map(|day| {
                running += day.total;
                PeriodTotal::new(day.label, running)
            })
            .collect()
    }

    /// Group bill totals by a formatted date key. Both formats are
    /// zero-padded, so BTreeMap order is chronological order.
    fn group_totals(bills: &[Bill], format: &str) -> Vec<PeriodTotal> {
        let mut groups: BTreeMap<String, f64> = BTreeMap::new();
        for bill in bills {
            let label = bill.created_at.format(format).to_string();
            *groups.entry(label).or_insert(0.0) += bill.total;
        }
        groups
            .into_iter()
            .map(|(label, total)| PeriodTotal::new(label, total))
            .collect()
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
