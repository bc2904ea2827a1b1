use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::bill::Bill;

/// Serializes the bill history for download and reads it back.
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Pretty-printed JSON array of every bill, oldest first.
    pub fn to_json(&self, bills: &[Bill]) -> Result<String, CoreError> {
        serde_json::to_string_pretty(bills)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize bills to JSON: {e}")))
    }

    /// Parse a JSON array of bills (the output of `to_json`).
    pub fn from_json(&self, json: &str) -> Result<Vec<Bill>, CoreError> {
        serde_json::from_str(json)
            .map_err(|e| CoreError::Deserialization(format!("Failed to parse bill export: {e}")))
    }

    /// One CSV row per line item.
    /// Columns: bill_id, created_at, item_name, category, payment_method,
    /// unit_price, quantity, line_total
    ///
    /// Amounts are written unrounded (`9.999` stays `9.999`, `50.0` is `50`).
    pub fn to_csv(&self, bills: &[Bill]) -> String {
        let mut csv = String::from(
            "bill_id,created_at,item_name,category,payment_method,unit_price,quantity,line_total\n",
        );
        for bill in bills {
            let created_at = bill.created_at.format("%Y-%m-%dT%H:%M:%S");
            for item in &bill.items {
                csv.push_str(&format!(
                    "{},{},{},{},{},{},{},{}\n",
                    bill.id,
                    created_at,
                    escape_csv(&item.name),
                    item.category,
                    item.payment_method,
                    item.unit_price,
                    item.quantity,
                    item.line_total,
                ));
            }
        }
        csv
    }

    /// Download file name for a JSON export made on `date`.
    pub fn file_name(&self, date: NaiveDate) -> String {
        format!("bills_export_{}.json", date.format("%Y-%m-%d"))
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new()
    }
}

/// Quote a field containing commas, quotes, or newlines.
fn escape_csv(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
