use chrono::{Datelike, Duration, NaiveDate};

use super::bill::Bill;

/// Date window used by the history filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    /// Bills created today
    Today,
    /// Today and the six days before it (inclusive)
    Last7Days,
    /// The current calendar month
    ThisMonth,
}

impl DateRange {
    /// Whether `date` falls inside this window relative to `today`.
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            DateRange::Today => date == today,
            DateRange::Last7Days => date <= today && date >= today - Duration::days(6),
            DateRange::ThisMonth => same_month(date, today),
        }
    }
}

impl std::str::FromStr for DateRange {
    type Err = crate::errors::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "today" => Ok(DateRange::Today),
            "week" | "7d" | "last7days" => Ok(DateRange::Last7Days),
            "month" | "thismonth" => Ok(DateRange::ThisMonth),
            other => Err(crate::errors::CoreError::ValidationError(format!(
                "Unknown date range '{other}' (expected today, week or month)"
            ))),
        }
    }
}

/// Query shapes supported by the bill history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillQuery {
    All,
    /// Case-insensitive substring match against item names and categories
    Text(String),
    Range(DateRange),
    TextInRange(String, DateRange),
}

impl BillQuery {
    /// Build a query from optional UI inputs.
    pub fn from_parts(text: Option<&str>, range: Option<DateRange>) -> Self {
        let text = text.map(str::trim).filter(|t| !t.is_empty());
        match (text, range) {
            (None, None) => BillQuery::All,
            (Some(t), None) => BillQuery::Text(t.to_string()),
            (None, Some(r)) => BillQuery::Range(r),
            (Some(t), Some(r)) => BillQuery::TextInRange(t.to_string(), r),
        }
    }

    pub fn matches(&self, bill: &Bill, today: NaiveDate) -> bool {
        match self {
            BillQuery::All => true,
            BillQuery::Text(text) => matches_text(bill, text),
            BillQuery::Range(range) => range.contains(bill.created_at.date(), today),
            BillQuery::TextInRange(text, range) => {
                range.contains(bill.created_at.date(), today) && matches_text(bill, text)
            }
        }
    }
}

fn matches_text(bill: &Bill, text: &str) -> bool {
    let q = text.trim().to_lowercase();
    if q.is_empty() {
        return true;
    }
    bill.items.iter().any(|item| {
        item.name.to_lowercase().contains(&q)
            || item.category.as_str().to_lowercase().contains(&q)
    })
}

pub(crate) fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}
