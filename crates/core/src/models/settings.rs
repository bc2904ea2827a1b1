use serde::{Deserialize, Serialize};

/// Light/dark appearance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User preferences. Each field lives under its own key in the
/// key-value store (see `storage::keys`).
///
/// **Note**: `saved_pin` is kept in plaintext. The PIN only gates the UI
/// and offers no cryptographic protection of the stored bills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub theme: Theme,

    /// Accent palette name used by the frontend
    pub color_theme: String,

    /// Font family name used by the frontend
    pub font_family: String,

    /// Monthly spending budget, if the user set one
    pub monthly_budget: Option<f64>,

    pub pin_enabled: bool,

    /// 4-digit PIN
    pub saved_pin: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            color_theme: "default".to_string(),
            font_family: "system".to_string(),
            monthly_budget: None,
            pin_enabled: false,
            saved_pin: None,
        }
    }
}
