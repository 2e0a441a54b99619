//! Fixed-rate currency conversion and display formatting.
//!
//! All conversion is routed through the base currency (Moroccan Dirham):
//! `convert(a, X, Y) == from_base(to_base(a, X), Y)`. Scaled values are
//! rounded to 2 decimal places with half-up semantics. Converting a
//! currency to itself is the exact identity and bypasses rounding.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// Moroccan Dirham, the base currency (rate 1).
    Mad,
    Eur,
    Usd,
    Xof,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::Mad, Currency::Eur, Currency::Usd, Currency::Xof];

    /// Base currency units per one unit of this currency.
    fn rate(self) -> f64 {
        match self {
            Currency::Mad => 1.0,
            Currency::Eur => 10.85,
            Currency::Usd => 9.95,
            Currency::Xof => 0.0165,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Currency::Mad => "MAD",
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Xof => "XOF",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Mad => "DH",
            Currency::Eur => "€",
            Currency::Usd => "$",
            Currency::Xof => "CFA",
        }
    }

    pub fn is_base(self) -> bool {
        self == Currency::Mad
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "MAD" => Ok(Currency::Mad),
            "EUR" => Ok(Currency::Eur),
            "USD" => Ok(Currency::Usd),
            "XOF" => Ok(Currency::Xof),
            _ => Err(anyhow::anyhow!("Unknown currency: {}", s)),
        }
    }
}

/// Half-up rounding to 2 decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Converts an amount in `currency` into the base currency.
pub fn to_base(amount: f64, currency: Currency) -> f64 {
    round2(amount * currency.rate())
}

/// Converts an amount in the base currency into `currency`.
pub fn from_base(amount: f64, currency: Currency) -> f64 {
    round2(amount / currency.rate())
}

pub fn convert(amount: f64, from: Currency, to: Currency) -> f64 {
    if from == to {
        return amount;
    }
    from_base(to_base(amount, from), to)
}

/// Locale-specific digit grouping and decimal separators. Only the primary
/// language subtag matters ("fr-MA" behaves like "fr").
fn separators(locale: &str) -> (char, char) {
    match locale.split(['-', '_']).next().unwrap_or_default() {
        "fr" => (' ', ','),
        _ => (',', '.'),
    }
}

/// Renders an amount with locale digit grouping and 0–2 fraction digits.
/// The symbol goes after the number for the Arabic locale and for the base
/// currency (regardless of locale), before the number otherwise.
pub fn format(amount: f64, currency: Currency, locale: &str) -> String {
    let (group_sep, decimal_sep) = separators(locale);

    let cents = (round2(amount) * 100.0).round() as i64;
    let int_part = (cents / 100).abs();
    let frac_part = (cents % 100).abs();

    let digits = int_part.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            grouped.push(group_sep);
        }
        grouped.push(c);
    }

    let mut number = grouped;
    if frac_part != 0 {
        number.push(decimal_sep);
        if frac_part % 10 == 0 {
            number.push_str(&(frac_part / 10).to_string());
        } else {
            number.push_str(&format!("{frac_part:02}"));
        }
    }

    let arabic = locale.split(['-', '_']).next().unwrap_or_default() == "ar";
    if currency.is_base() || arabic {
        format!("{number} {}", currency.symbol())
    } else {
        format!("{}{number}", currency.symbol())
    }
}

/// Localized display name; locales outside {en, fr, ar} fall back to the
/// generic English name.
pub fn name(currency: Currency, locale: &str) -> &'static str {
    let lang = locale.split(['-', '_']).next().unwrap_or_default();
    match (currency, lang) {
        (Currency::Mad, "fr") => "Dirham marocain",
        (Currency::Mad, "ar") => "درهم مغربي",
        (Currency::Mad, _) => "Moroccan Dirham",
        (Currency::Eur, "fr") => "Euro",
        (Currency::Eur, "ar") => "يورو",
        (Currency::Eur, _) => "Euro",
        (Currency::Usd, "fr") => "Dollar américain",
        (Currency::Usd, "ar") => "دولار أمريكي",
        (Currency::Usd, _) => "US Dollar",
        (Currency::Xof, "fr") => "Franc CFA",
        (Currency::Xof, "ar") => "فرنك سيفا",
        (Currency::Xof, _) => "CFA Franc",
    }
}
