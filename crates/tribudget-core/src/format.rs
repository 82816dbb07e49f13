//! Amount rendering with magnitude suffixes.

use tribudget_domain::{symbol_for, DenominationFormat, DenominationOptions};

/// Formats currency amounts for presentation.
pub trait CurrencyFormatter: Send + Sync {
    fn format_amount(&self, amount: f64, currency: &str) -> String;
}

type Tier = (f64, &'static str);

const INTERNATIONAL_TIERS: &[Tier] = &[
    (1e12, "T"),
    (1e9, "B"),
    (1e6, "M"),
    (1e3, "K"),
    (1.0, ""),
];

const INDIAN_TIERS: &[Tier] = &[(1e7, "Cr"), (1e5, "L"), (1e3, "k"), (1.0, "")];

const GERMAN_COMPACT_TIERS: &[Tier] = &[
    (1e12, "\u{a0}Bio."),
    (1e9, "\u{a0}Mrd."),
    (1e6, "\u{a0}Mio."),
    (1e3, "\u{a0}Tsd."),
    (1.0, ""),
];

const FRENCH_COMPACT_TIERS: &[Tier] = &[
    (1e12, "\u{a0}Bn"),
    (1e9, "\u{a0}Md"),
    (1e6, "\u{a0}M"),
    (1e3, "\u{a0}k"),
    (1.0, ""),
];

/// Suffixes and separators used by compact notation in one locale family.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CompactStyle {
    tiers: &'static [Tier],
    decimal: char,
    group: char,
}

const ENGLISH_COMPACT: CompactStyle = CompactStyle {
    tiers: INTERNATIONAL_TIERS,
    decimal: '.',
    group: ',',
};

const INDIAN_COMPACT: CompactStyle = CompactStyle {
    tiers: INDIAN_TIERS,
    decimal: '.',
    group: ',',
};

const GERMAN_COMPACT: CompactStyle = CompactStyle {
    tiers: GERMAN_COMPACT_TIERS,
    decimal: ',',
    group: '.',
};

const FRENCH_COMPACT: CompactStyle = CompactStyle {
    tiers: FRENCH_COMPACT_TIERS,
    decimal: ',',
    group: '\u{202f}',
};

/// Resolves a BCP 47 tag to a compact style. Unsupported tags use US English.
fn compact_style(locale: &str) -> CompactStyle {
    let tag = locale.trim().replace('_', "-").to_ascii_lowercase();
    let mut parts = tag.split('-');
    let language = parts.next().unwrap_or_default();
    let region = parts.find(|part| part.len() == 2);
    match (language, region) {
        ("hi", _) | ("en", Some("in")) => INDIAN_COMPACT,
        ("de", _) => GERMAN_COMPACT,
        ("fr", _) => FRENCH_COMPACT,
        _ => ENGLISH_COMPACT,
    }
}

/// Renders `value` according to `options`.
///
/// Non-finite input renders as `{symbol}0`. Negative values carry a leading `-`
/// before the symbol unless they round to zero.
pub fn format_denominated(value: f64, options: &DenominationOptions) -> String {
    let symbol = options.currency_symbol.as_str();
    if !value.is_finite() {
        return format!("{}0", symbol);
    }
    let magnitude = value.abs();
    let decimals = options.effective_decimal_places() as usize;
    let keep_zeros = options.show_zero_decimals;
    let (body, suffix) = match options.format {
        DenominationFormat::None => (render_fixed(magnitude.round(), 0, false), ""),
        DenominationFormat::International => {
            let (scaled, suffix) = denominate(magnitude, INTERNATIONAL_TIERS, |_| decimals);
            (render_fixed(scaled, decimals, keep_zeros), suffix)
        }
        DenominationFormat::Indian => {
            let (scaled, suffix) = denominate(magnitude, INDIAN_TIERS, |_| decimals);
            (render_fixed(scaled, decimals, keep_zeros), suffix)
        }
        DenominationFormat::Compact => compact(magnitude, compact_style(&options.locale)),
    };
    let sign = if value < 0.0 && !is_zero_text(&body) {
        "-"
    } else {
        ""
    };
    format!("{}{}{}{}", sign, symbol, body, suffix)
}

/// Short compact notation: one fraction digit below ten units, none above.
/// Trailing zero fractions are always dropped, matching locale compact formatters.
fn compact(magnitude: f64, style: CompactStyle) -> (String, &'static str) {
    let precision = |scaled: f64| if scaled < 10.0 { 1 } else { 0 };
    let (scaled, suffix) = denominate(magnitude, style.tiers, precision);
    let body = render_fixed(scaled, precision(scaled), false)
        .chars()
        .map(|ch| match ch {
            '.' => style.decimal,
            ',' => style.group,
            other => other,
        })
        .collect();
    (body, suffix)
}

/// Picks the largest tier `magnitude` reaches and rounds the scaled value, moving up a tier
/// when rounding lands on the next threshold.
fn denominate<F>(magnitude: f64, tiers: &[Tier], precision: F) -> (f64, &'static str)
where
    F: Fn(f64) -> usize,
{
    let last = tiers.len() - 1;
    let mut index = tiers
        .iter()
        .position(|(threshold, _)| magnitude >= *threshold)
        .unwrap_or(last);
    loop {
        let (threshold, suffix) = tiers[index];
        let scaled = magnitude / threshold;
        let rounded = round_to(scaled, precision(scaled));
        if index > 0 && rounded * threshold >= tiers[index - 1].0 {
            index -= 1;
            continue;
        }
        return (rounded, suffix);
    }
}

/// Rounds half away from zero; values too large to scale come back unchanged.
fn round_to(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

fn render_fixed(value: f64, decimals: usize, keep_zero_decimals: bool) -> String {
    let text = format!("{:.*}", decimals, value);
    match text.split_once('.') {
        Some((int_part, fraction))
            if keep_zero_decimals || fraction.chars().any(|ch| ch != '0') =>
        {
            format!("{}.{}", group_digits(int_part), fraction)
        }
        Some((int_part, _)) => group_digits(int_part),
        None => group_digits(&text),
    }
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, ',');
        }
        grouped.insert(0, ch);
    }
    grouped
}

fn is_zero_text(body: &str) -> bool {
    body.chars().all(|ch| !ch.is_ascii_digit() || ch == '0')
}

/// [`CurrencyFormatter`] backed by a set of [`DenominationOptions`].
#[derive(Debug, Clone, Default)]
pub struct DenominationFormatter {
    options: DenominationOptions,
}

impl DenominationFormatter {
    pub fn new(options: DenominationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DenominationOptions {
        &self.options
    }

    /// Formats with the configured symbol.
    pub fn format(&self, value: f64) -> String {
        format_denominated(value, &self.options)
    }
}

impl CurrencyFormatter for DenominationFormatter {
    fn format_amount(&self, amount: f64, currency: &str) -> String {
        let mut options = self.options.clone();
        options.currency_symbol = symbol_for(currency);
        format_denominated(amount, &options)
    }
}
