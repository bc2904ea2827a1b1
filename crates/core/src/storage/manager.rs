use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::bill::Bill;
use crate::models::settings::{Settings, Theme};

use super::keys;
use super::traits::KeyValueStore;

/// High-level storage operations: bills and settings to/from a key-value store.
pub struct StorageManager;

impl StorageManager {
    /// Read the full bill collection. A store that never saw a bill yields
    /// an empty list.
    ///
    /// Flow: store["bills"] → JSON → Vec<Bill>
    pub fn load_bills(store: &dyn KeyValueStore) -> Result<Vec<Bill>, CoreError> {
        let Some(raw) = store.get(keys::BILLS)? else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        let bills: Vec<Bill> = serde_json::from_str(&raw)
            .map_err(|e| CoreError::Deserialization(format!("Failed to parse stored bills: {e}")))?;
        debug!(store = store.name(), count = bills.len(), "loaded bills");
        Ok(bills)
    }

    /// Rewrite the full bill collection. Bills with a non-finite amount are
    /// refused, since JSON would store them as `null` and the collection
    /// could no longer be read back.
    ///
    /// Flow: Vec<Bill> → JSON → store["bills"]
    pub fn save_bills(store: &mut dyn KeyValueStore, bills: &[Bill]) -> Result<(), CoreError> {
        if let Some(bill) = bills.iter().find(|b| !has_finite_amounts(b)) {
            return Err(CoreError::Serialization(format!(
                "Bill {} has a non-finite amount",
                bill.id
            )));
        }
        let json = serde_json::to_string(bills)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize bills: {e}")))?;
        store.set(keys::BILLS, &json)?;
        debug!(store = store.name(), count = bills.len(), bytes = json.len(), "saved bills");
        Ok(())
    }

    /// Read settings from their individual keys. Missing keys take the
    /// default; unparsable values fall back to the default with a warning.
    pub fn load_settings(store: &dyn KeyValueStore) -> Result<Settings, CoreError> {
        let mut settings = Settings::default();

        if let Some(raw) = store.get(keys::THEME)? {
            match Theme::parse(&raw) {
                Some(theme) => settings.theme = theme,
                None => warn!(key = keys::THEME, value = %raw, "ignoring unknown theme"),
            }
        }
        if let Some(raw) = store.get(keys::COLOR_THEME)? {
            if !raw.trim().is_empty() {
                settings.color_theme = raw;
            }
        }
        if let Some(raw) = store.get(keys::FONT_FAMILY)? {
            if !raw.trim().is_empty() {
                settings.font_family = raw;
            }
        }
        if let Some(raw) = store.get(keys::MONTHLY_BUDGET)? {
            match raw.trim().parse::<f64>() {
                Ok(v) if v.is_finite() && v > 0.0 => settings.monthly_budget = Some(v),
                _ => warn!(key = keys::MONTHLY_BUDGET, value = %raw, "ignoring invalid budget"),
            }
        }
        if let Some(raw) = store.get(keys::PIN_ENABLED)? {
            match raw.trim() {
                "true" => settings.pin_enabled = true,
                "false" => settings.pin_enabled = false,
                _ => warn!(key = keys::PIN_ENABLED, value = %raw, "ignoring invalid flag"),
            }
        }
        settings.saved_pin = store.get(keys::SAVED_PIN)?.filter(|p| !p.is_empty());

        // An enabled lock without a PIN would lock the user out.
        if settings.pin_enabled && settings.saved_pin.is_none() {
            warn!("pin lock enabled without a saved PIN; disabling");
            settings.pin_enabled = false;
        }

        Ok(settings)
    }

    /// Write every settings key.
    ///
    /// The PIN is written before the lock is switched on and after it is
    /// switched off, so an interrupted save never leaves the lock enabled
    /// with a stale PIN.
    pub fn save_settings(store: &mut dyn KeyValueStore, settings: &Settings) -> Result<(), CoreError> {
        store.set(keys::THEME, settings.theme.as_str())?;
        store.set(keys::COLOR_THEME, &settings.color_theme)?;
        store.set(keys::FONT_FAMILY, &settings.font_family)?;
        match settings.monthly_budget {
            Some(budget) => store.set(keys::MONTHLY_BUDGET, &budget.to_string())?,
            None => store.remove(keys::MONTHLY_BUDGET)?,
        }
        if settings.pin_enabled {
            Self::save_pin(store, settings.saved_pin.as_deref())?;
            store.set(keys::PIN_ENABLED, "true")?;
        } else {
            store.set(keys::PIN_ENABLED, "false")?;
            Self::save_pin(store, settings.saved_pin.as_deref())?;
        }
        Ok(())
    }

    fn save_pin(store: &mut dyn KeyValueStore, pin: Option<&str>) -> Result<(), CoreError> {
        match pin {
            Some(pin) => store.set(keys::SAVED_PIN, pin),
            None => store.remove(keys::SAVED_PIN),
        }
    }
}

fn has_finite_amounts(bill: &Bill) -> bool {
    bill.total.is_finite()
        && bill
            .items
            .iter()
            .all(|i| i.unit_price.is_finite() && i.line_total.is_finite())
}
