//! Currency and currency pair types for the strength service.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the eight currencies the service tracks.
///
/// Declaration order is the order currencies appear in aggregate maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Chf,
    Cad,
    Aud,
    Jpy,
    Nzd,
}

impl Currency {
    /// All known currencies.
    pub const ALL: [Currency; 8] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Chf,
        Currency::Cad,
        Currency::Aud,
        Currency::Jpy,
        Currency::Nzd,
    ];

    /// Get the ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Chf => "CHF",
            Currency::Cad => "CAD",
            Currency::Aud => "AUD",
            Currency::Jpy => "JPY",
            Currency::Nzd => "NZD",
        }
    }

    /// Look up a currency by its exact upper-case code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = UnknownCurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| UnknownCurrencyError(s.to_string()))
    }
}

/// Error when a code does not name a known currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCurrencyError(pub String);

impl fmt::Display for UnknownCurrencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown currency: {}", self.0)
    }
}

impl std::error::Error for UnknownCurrencyError {}

/// A base/quote currency pair, written as a 6-letter code such as `EURUSD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurrencyPair {
    /// Base currency.
    pub base: Currency,
    /// Quote currency.
    pub quote: Currency,
}

impl CurrencyPair {
    /// Create a new currency pair.
    pub const fn new(base: Currency, quote: Currency) -> Self {
        Self { base, quote }
    }

    /// Decompose a 6-character code into a pair of two distinct known currencies.
    ///
    /// Returns `None` for anything else: wrong length, unknown codes, or a
    /// currency paired with itself.
    pub fn from_code(code: &str) -> Option<Self> {
        if code.len() != 6 {
            return None;
        }

        let base = Currency::from_code(code.get(..3)?)?;
        let quote = Currency::from_code(code.get(3..)?)?;

        if base == quote {
            return None;
        }

        Some(Self { base, quote })
    }

    /// Get the 6-letter pair code.
    pub fn code(&self) -> String {
        format!("{}{}", self.base.code(), self.quote.code())
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base, self.quote)
    }
}

/// The fixed set of pairs the service generates strengths for.
pub const STATIC_PAIRS: [CurrencyPair; 26] = {
    use Currency::*;
    [
        CurrencyPair::new(Eur, Usd),
        CurrencyPair::new(Gbp, Usd),
        CurrencyPair::new(Usd, Jpy),
        CurrencyPair::new(Aud, Usd),
        CurrencyPair::new(Usd, Cad),
        CurrencyPair::new(Usd, Chf),
        CurrencyPair::new(Eur, Gbp),
        CurrencyPair::new(Eur, Jpy),
        CurrencyPair::new(Gbp, Jpy),
        CurrencyPair::new(Aud, Jpy),
        CurrencyPair::new(Cad, Jpy),
        CurrencyPair::new(Chf, Jpy),
        CurrencyPair::new(Eur, Aud),
        CurrencyPair::new(Gbp, Aud),
        CurrencyPair::new(Aud, Cad),
        CurrencyPair::new(Aud, Chf),
        CurrencyPair::new(Cad, Chf),
        CurrencyPair::new(Eur, Cad),
        CurrencyPair::new(Gbp, Cad),
        CurrencyPair::new(Gbp, Chf),
        CurrencyPair::new(Eur, Nzd),
        CurrencyPair::new(Gbp, Nzd),
        CurrencyPair::new(Aud, Nzd),
        CurrencyPair::new(Cad, Nzd),
        CurrencyPair::new(Chf, Nzd),
        CurrencyPair::new(Jpy, Nzd),
    ]
};
