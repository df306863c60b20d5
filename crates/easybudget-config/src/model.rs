use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Stores user-configurable preferences and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    /// How many months ahead recurring rules are materialized.
    #[serde(default = "Config::default_horizon_months")]
    pub horizon_months: u32,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom data directory. Defaults to `~/.easybudget`.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            horizon_months: Self::default_horizon_months(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn default_horizon_months() -> u32 {
        12
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// Horizon months with the `>= 1` floor applied.
    pub fn resolve_horizon_months(&self) -> u32 {
        self.horizon_months.max(1)
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }

        let base = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join(".easybudget")
    }
}
