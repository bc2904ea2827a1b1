use std::collections::BTreeMap;
use std::io::{self, Write};

use bill_ledger_core::models::analytics::{BudgetStatus, DashboardStats};
use bill_ledger_core::models::bill::{Bill, LineItem};
use bill_ledger_core::models::category::Category;
use bill_ledger_core::models::chart::PeriodTotal;

/// Width of the bar in text charts.
const BAR_WIDTH: f64 = 30.0;

/// First 8 characters of a UUID; enough to address a bill interactively.
pub fn short_id(id: &uuid::Uuid) -> String {
    id.to_string()[..8].to_string()
}

pub fn draft(out: &mut dyn Write, items: &[LineItem], total: f64) -> io::Result<()> {
    if items.is_empty() {
        return writeln!(out, "Draft is empty.");
    }
    for (idx, item) in items.iter().enumerate() {
        writeln!(
            out,
            "{:>3}. {:<20} {:>4} x {:>9.2} = {:>10.2}  {:<11} {}",
            idx + 1,
            item.name,
            item.quantity,
            item.unit_price,
            item.line_total,
            item.category,
            item.payment_method,
        )?;
    }
    writeln!(out, "Draft total: {total:.2}")
}

pub fn bill_row(out: &mut dyn Write, bill: &Bill) -> io::Result<()> {
    writeln!(
        out,
        "{}  {}  {:>3} item(s)  {:>10.2}",
        short_id(&bill.id),
        bill.created_at.format("%Y-%m-%d %H:%M"),
        bill.items.len(),
        bill.total,
    )
}

/// Print bills (already ordered by the caller) and return how many were shown.
pub fn bills<'a>(out: &mut dyn Write, bills: impl Iterator<Item = &'a Bill>) -> io::Result<usize> {
    let mut shown = 0;
    for bill in bills {
        bill_row(out, bill)?;
        shown += 1;
    }
    if shown == 0 {
        writeln!(out, "No bills found.")?;
    }
    Ok(shown)
}

pub fn stats(out: &mut dyn Write, stats: &DashboardStats, budget: Option<&BudgetStatus>) -> io::Result<()> {
    writeln!(out, "Bills:              {}", stats.bill_count)?;
    writeln!(out, "Total expense:      {:.2}", stats.total_expense)?;
    writeln!(out, "Average bill:       {:.2}", stats.average_bill_amount)?;
    writeln!(out, "This month:         {:.2}", stats.current_month_total)?;
    if let Some(b) = budget {
        writeln!(out, "Monthly budget:     {:.2}", b.budget)?;
        writeln!(out, "Remaining:          {:.2} ({:.1}% used)", b.remaining, b.percent_used)?;
        if b.over_budget {
            writeln!(out, "Over budget!")?;
        }
    }
    Ok(())
}

pub fn category_totals(out: &mut dyn Write, totals: &BTreeMap<Category, f64>) -> io::Result<()> {
    if totals.is_empty() {
        return writeln!(out, "No data.");
    }
    let max = totals.values().copied().fold(0.0_f64, f64::max);
    for (category, total) in totals {
        writeln!(out, "{:<12} {:>10.2}  {}", category.as_str(), total, bar(*total, max))?;
    }
    Ok(())
}

pub fn series(out: &mut dyn Write, points: &[PeriodTotal]) -> io::Result<()> {
    if points.is_empty() {
        return writeln!(out, "No data.");
    }
    let max = points.iter().map(|p| p.total).fold(0.0_f64, f64::max);
    for point in points {
        writeln!(out, "{:<10} {:>10.2}  {}", point.label, point.total, bar(point.total, max))?;
    }
    Ok(())
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH).round() as usize;
    "#".repeat(len)
}
