use std::path::PathBuf;

use serde::{de::Deserializer, Deserialize, Serialize};
use tribudget_domain::{
    symbol_for, DenominationFormat, DenominationOptions, DEFAULT_CURRENCY, MAX_DECIMAL_PLACES,
};

/// User preferences that affect presentation and where data lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "Settings::default_locale")]
    pub locale: String,
    #[serde(
        default = "Settings::default_currency",
        deserialize_with = "deserialize_currency"
    )]
    pub currency: String,
    #[serde(default, deserialize_with = "deserialize_denomination")]
    pub denomination: DenominationFormat,
    #[serde(default = "DenominationOptions::default_decimal_places")]
    pub decimal_places: u8,
    #[serde(default)]
    pub show_zero_decimals: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for stored books. Defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            locale: Self::default_locale(),
            currency: Self::default_currency(),
            denomination: DenominationFormat::default(),
            decimal_places: DenominationOptions::default_decimal_places(),
            show_zero_decimals: false,
            data_dir: None,
        }
    }
}

impl Settings {
    pub fn default_locale() -> String {
        DenominationOptions::default_locale()
    }

    pub fn default_currency() -> String {
        DEFAULT_CURRENCY.code.into()
    }

    pub fn currency_symbol(&self) -> String {
        symbol_for(&self.currency)
    }

    /// Formatter options for the configured currency and locale.
    pub fn denomination_options(&self) -> DenominationOptions {
        DenominationOptions {
            format: self.denomination,
            locale: self.locale.clone(),
            currency_symbol: self.currency_symbol(),
            decimal_places: self.decimal_places.min(MAX_DECIMAL_PLACES),
            show_zero_decimals: self.show_zero_decimals,
        }
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }

        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("tribudget")
    }
}

fn deserialize_currency<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|code| code.trim().to_ascii_uppercase())
        .filter(|code| !code.is_empty())
        .unwrap_or_else(Settings::default_currency))
}

/// Unknown or missing format names fall back to plain rendering.
fn deserialize_denomination<'de, D>(deserializer: D) -> Result<DenominationFormat, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    let format = match value.as_deref().map(|v| v.trim().to_ascii_lowercase()) {
        Some(v) if v == "international" => DenominationFormat::International,
        Some(v) if v == "indian" => DenominationFormat::Indian,
        Some(v) if v == "compact" => DenominationFormat::Compact,
        _ => DenominationFormat::None,
    };
    Ok(format)
}
