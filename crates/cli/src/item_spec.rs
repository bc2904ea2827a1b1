use std::str::FromStr;

use bill_ledger_core::errors::CoreError;
use bill_ledger_core::models::category::{Category, PaymentMethod};

/// A line item as typed on the command line:
/// `NAME:PRICE:QTY[:CATEGORY[:PAYMENT]]`, e.g. `Rice:50:2:groceries:upi`.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSpec {
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub category: Category,
    pub payment_method: PaymentMethod,
}

impl ItemSpec {
    /// Build a spec from already split fields (name, price, qty, then
    /// optional category and payment method).
    pub fn from_fields(fields: &[&str]) -> Result<Self, CoreError> {
        if !(3..=5).contains(&fields.len()) {
            return Err(CoreError::ValidationError(
                "Expected NAME PRICE QTY [CATEGORY [PAYMENT]]".into(),
            ));
        }
        let unit_price = fields[1].trim().parse::<f64>().map_err(|_| {
            CoreError::ValidationError(format!("Invalid price '{}'", fields[1]))
        })?;
        let quantity = fields[2].trim().parse::<u32>().map_err(|_| {
            CoreError::ValidationError(format!(
                "Invalid quantity '{}': must be a whole number",
                fields[2]
            ))
        })?;
        let category = match fields.get(3) {
            Some(c) => c.parse()?,
            None => Category::default(),
        };
        let payment_method = match fields.get(4) {
            Some(p) => p.parse()?,
            None => PaymentMethod::default(),
        };

        Ok(Self {
            name: fields[0].to_string(),
            unit_price,
            quantity,
            category,
            payment_method,
        })
    }
}

impl FromStr for ItemSpec {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(':').collect();
        Self::from_fields(&fields)
    }
}
