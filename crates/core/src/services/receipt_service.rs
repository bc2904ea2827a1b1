use crate::models::bill::Bill;

const RULE_WIDTH: usize = 40;

/// Renders a bill as a plain-text receipt for viewing or printing.
pub struct ReceiptService;

impl ReceiptService {
    pub fn new() -> Self {
        Self
    }

    /// Layout:
    /// ```text
    /// BILL RECEIPT
    /// Bill: <uuid>
    /// Date: 2025-01-15
    /// Time: 14:30:05
    /// ----------------------------------------
    /// Rice
    ///   2 x 50.00 = 100.00  [Groceries, Cash]
    /// ----------------------------------------
    /// Items: 1
    /// Units: 2
    /// TOTAL: 100.00
    /// ```
    pub fn render(&self, bill: &Bill) -> String {
        let rule = "-".repeat(RULE_WIDTH);
        let mut out = String::new();

        out.push_str("BILL RECEIPT\n");
        out.push_str(&format!("Bill: {}\n", bill.id));
        out.push_str(&format!("Date: {}\n", bill.created_at.format("%Y-%m-%d")));
        out.push_str(&format!("Time: {}\n", bill.created_at.format("%H:%M:%S")));
        out.push_str(&rule);
        out.push('\n');

        for item in &bill.items {
            out.push_str(&format!("{}\n", item.name));
            out.push_str(&format!(
                "  {} x {:.2} = {:.2}  [{}, {}]\n",
                item.quantity, item.unit_price, item.line_total, item.category, item.payment_method
            ));
        }

        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format!("Items: {}\n", bill.items.len()));
        out.push_str(&format!("Units: {}\n", bill.unit_count()));
        out.push_str(&format!("TOTAL: {:.2}\n", bill.total));
        out
    }
}

impl Default for ReceiptService {
    fn default() -> Self {
        Self::new()
    }
}
