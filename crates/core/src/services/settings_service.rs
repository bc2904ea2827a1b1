use crate::errors::CoreError;
use crate::models::settings::Settings;

/// Validation and mutation rules for user settings and the PIN gate.
///
/// Works on an in-memory `Settings`; the facade persists the result.
pub struct SettingsService;

impl SettingsService {
    pub fn new() -> Self {
        Self
    }

    /// Set or clear the monthly budget. A set budget must be positive and finite.
    pub fn set_monthly_budget(&self, settings: &mut Settings, budget: Option<f64>) -> Result<(), CoreError> {
        if let Some(value) = budget {
            if !value.is_finite() || value <= 0.0 {
                return Err(CoreError::ValidationError(format!(
                    "Monthly budget must be a positive number, got {value}"
                )));
            }
        }
        settings.monthly_budget = budget;
        Ok(())
    }

    /// Store a new PIN and enable the lock. The PIN must be exactly 4 ASCII digits.
    pub fn set_pin(&self, settings: &mut Settings, pin: &str) -> Result<(), CoreError> {
        let pin = pin.trim();
        if pin.len() != 4 || !pin.chars().all(|c| c.is_ascii_digit()) {
            return Err(CoreError::ValidationError(
                "PIN must be exactly 4 digits".into(),
            ));
        }
        settings.saved_pin = Some(pin.to_string());
        settings.pin_enabled = true;
        Ok(())
    }

    pub fn disable_pin(&self, settings: &mut Settings) {
        settings.pin_enabled = false;
        settings.saved_pin = None;
    }

    /// Whether `candidate` matches the stored PIN. Always `false` when the
    /// lock is disabled.
    pub fn verify_pin(&self, settings: &Settings, candidate: &str) -> bool {
        settings.pin_enabled
            && settings
                .saved_pin
                .as_deref()
                .is_some_and(|pin| pin == candidate.trim())
    }

    pub fn set_appearance(
        &self,
        settings: &mut Settings,
        color_theme: Option<&str>,
        font_family: Option<&str>,
    ) -> Result<(), CoreError> {
        if let Some(color) = color_theme {
            let color = color.trim();
            if color.is_empty() {
                return Err(CoreError::ValidationError("Color theme must not be empty".into()));
            }
            settings.color_theme = color.to_string();
        }
        if let Some(font) = font_family {
            let font = font.trim();
            if font.is_empty() {
                return Err(CoreError::ValidationError("Font family must not be empty".into()));
            }
            settings.font_family = font.to_string();
        }
        Ok(())
    }
}

impl Default for SettingsService {
    fn default() -> Self {
        Self::new()
    }
}
