//! Currency reference table and number-denomination preferences.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Presentational currency record. Carries no exchange semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Currency {
    pub code: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
}

pub const CURRENCIES: &[Currency] = &[
    Currency { code: "USD", symbol: "$", name: "US Dollar" },
    Currency { code: "EUR", symbol: "€", name: "Euro" },
    Currency { code: "GBP", symbol: "£", name: "British Pound" },
    Currency { code: "INR", symbol: "₹", name: "Indian Rupee" },
    Currency { code: "JPY", symbol: "¥", name: "Japanese Yen" },
    Currency { code: "CNY", symbol: "¥", name: "Chinese Yuan" },
    Currency { code: "CAD", symbol: "C$", name: "Canadian Dollar" },
    Currency { code: "AUD", symbol: "A$", name: "Australian Dollar" },
    Currency { code: "CHF", symbol: "CHF", name: "Swiss Franc" },
    Currency { code: "SGD", symbol: "S$", name: "Singapore Dollar" },
    Currency { code: "AED", symbol: "د.إ", name: "UAE Dirham" },
    Currency { code: "BRL", symbol: "R$", name: "Brazilian Real" },
    Currency { code: "MXN", symbol: "MX$", name: "Mexican Peso" },
    Currency { code: "ZAR", symbol: "R", name: "South African Rand" },
    Currency { code: "KRW", symbol: "₩", name: "South Korean Won" },
];

pub const DEFAULT_CURRENCY: Currency = Currency {
    code: "USD",
    symbol: "$",
    name: "US Dollar",
};

/// Looks up a currency by ISO code, ignoring case.
pub fn find_currency(code: &str) -> Option<Currency> {
    CURRENCIES
        .iter()
        .copied()
        .find(|currency| currency.code.eq_ignore_ascii_case(code.trim()))
}

/// Symbol for `code`, falling back to the code itself for unknown currencies.
pub fn symbol_for(code: &str) -> String {
    find_currency(code)
        .map(|currency| currency.symbol.to_string())
        .unwrap_or_else(|| code.trim().to_uppercase())
}

/// Magnitude-suffix system applied to displayed amounts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DenominationFormat {
    #[default]
    None,
    International,
    Indian,
    Compact,
}

impl fmt::Display for DenominationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DenominationFormat::None => "none",
            DenominationFormat::International => "international",
            DenominationFormat::Indian => "indian",
            DenominationFormat::Compact => "compact",
        };
        f.write_str(label)
    }
}

/// Upper bound applied to `decimal_places` when rendering.
pub const MAX_DECIMAL_PLACES: u8 = 6;

/// Options controlling how an amount is rendered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DenominationOptions {
    #[serde(default)]
    pub format: DenominationFormat,
    /// BCP 47 tag; selects the suffixes and separators of compact notation.
    #[serde(default = "DenominationOptions::default_locale")]
    pub locale: String,
    #[serde(default = "DenominationOptions::default_symbol")]
    pub currency_symbol: String,
    #[serde(default = "DenominationOptions::default_decimal_places")]
    pub decimal_places: u8,
    #[serde(default)]
    pub show_zero_decimals: bool,
}

impl DenominationOptions {
    pub fn default_symbol() -> String {
        DEFAULT_CURRENCY.symbol.to_string()
    }

    pub fn default_locale() -> String {
        "en-US".into()
    }

    pub fn default_decimal_places() -> u8 {
        1
    }

    /// `decimal_places` capped at [`MAX_DECIMAL_PLACES`].
    pub fn effective_decimal_places(&self) -> u8 {
        self.decimal_places.min(MAX_DECIMAL_PLACES)
    }

    pub fn with_format(mut self, format: DenominationFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }
}

impl Default for DenominationOptions {
    fn default() -> Self {
        Self {
            format: DenominationFormat::default(),
            locale: Self::default_locale(),
            currency_symbol: Self::default_symbol(),
            decimal_places: Self::default_decimal_places(),
            show_zero_decimals: false,
        }
    }
}
