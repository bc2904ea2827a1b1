//! Keys used in the key-value store.

/// JSON array of every committed bill, chronological.
pub const BILLS: &str = "bills";

pub const THEME: &str = "theme";
pub const COLOR_THEME: &str = "colorTheme";
pub const FONT_FAMILY: &str = "fontFamily";

/// Stringified decimal.
pub const MONTHLY_BUDGET: &str = "monthlyBudget";

/// `"true"` / `"false"`.
pub const PIN_ENABLED: &str = "pinEnabled";

/// Plaintext 4-digit PIN.
pub const SAVED_PIN: &str = "savedPin";
