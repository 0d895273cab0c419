//! Currency symbols and the display convention for money.

use crate::model::Amount;
use serde::{Deserialize, Serialize};

/// Where the currency symbol goes relative to the numeral.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyPosition {
    #[default]
    Left,
    Right,
}

serde_plain::derive_display_from_serialize!(CurrencyPosition);
serde_plain::derive_fromstr_from_deserialize!(CurrencyPosition);

/// Renders `amount` with `symbol` on the given side.
///
/// With the symbol on the left a negative amount is written `-$12.5`, pulling the sign in front of
/// the symbol. With the symbol on the right the sign stays on the numeral: `-12.5 $`. Trailing
/// fractional zeros are dropped from the numeral.
///
/// ```
/// # use cashlens::model::{format, Amount, CurrencyPosition};
/// # use std::str::FromStr;
/// let a = Amount::from_str("-12.50").unwrap();
/// assert_eq!(format(a, "$", CurrencyPosition::Left), "-$12.5");
/// assert_eq!(format(a, "€", CurrencyPosition::Right), "-12.5 €");
/// ```
pub fn format(amount: Amount, symbol: &str, position: CurrencyPosition) -> String {
    let amount = amount.normalize();
    match position {
        CurrencyPosition::Left if amount.is_negative() => format!("-{symbol}{}", amount.abs()),
        CurrencyPosition::Left => format!("{symbol}{amount}"),
        CurrencyPosition::Right => format!("{amount} {symbol}"),
    }
}

/// A currency code and the symbol used to display it.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Currency {
    name: String,
    symbol: String,
}

impl Currency {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn format(&self, amount: Amount, position: CurrencyPosition) -> String {
        format(amount, &self.symbol, position)
    }
}

/// The currencies that are always available, as `(code, symbol)`.
pub const BUILTIN_CURRENCIES: &[(&str, &str)] = &[
    ("AED", "AED"),
    ("AUD", "A$"),
    ("BDT", "৳"),
    ("BRL", "R$"),
    ("CAD", "C$"),
    ("CHF", "Fr"),
    ("CNY", "¥"),
    ("DKK", "kr."),
    ("EUR", "€"),
    ("GBP", "£"),
    ("HKD", "HK$"),
    ("IDR", "Rp"),
    ("ILS", "₪"),
    ("INR", "₹"),
    ("JPY", "¥"),
    ("KRW", "₩"),
    ("MAD", "DH"),
    ("MXN", "Mex$"),
    ("MYR", "RM"),
    ("NZD", "NZ$"),
    ("PHP", "₱"),
    ("PLN", "zł"),
    ("RUB", "₽"),
    ("SEK", "kr"),
    ("SGD", "S$"),
    ("THB", "฿"),
    ("TRY", "₺"),
    ("USD", "$"),
    ("VND", "₫"),
    ("ZAR", "R"),
];

pub const DEFAULT_CURRENCY: &str = "USD";

/// The user's currency choice: which code is selected, which side the symbol goes on, and any
/// currencies they defined themselves.
///
/// Example:
/// ```json
/// { "selected": "EUR", "position": "right", "custom": [{ "name": "BTC", "symbol": "₿" }] }
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CurrencySettings {
    selected: String,
    #[serde(default)]
    position: CurrencyPosition,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    custom: Vec<Currency>,
}

impl Default for CurrencySettings {
    fn default() -> Self {
        Self {
            selected: DEFAULT_CURRENCY.to_string(),
            position: CurrencyPosition::Left,
            custom: Vec::new(),
        }
    }
}

impl CurrencySettings {
    pub fn new(selected: impl Into<String>, position: CurrencyPosition) -> Self {
        Self {
            selected: selected.into(),
            position,
            custom: Vec::new(),
        }
    }

    pub fn with_custom(mut self, currency: Currency) -> Self {
        self.custom.push(currency);
        self
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn position(&self) -> CurrencyPosition {
        self.position
    }

    /// Every known currency: user-defined ones first so they can override a built-in symbol.
    pub fn currencies(&self) -> Vec<Currency> {
        self.custom
            .iter()
            .cloned()
            .chain(
                BUILTIN_CURRENCIES
                    .iter()
                    .filter(|(code, _)| !self.custom.iter().any(|c| c.name() == *code))
                    .map(|(code, symbol)| Currency::new(*code, *symbol)),
            )
            .collect()
    }

    /// Looks up the selected currency. Unknown codes display with the code itself as the symbol.
    pub fn currency(&self) -> Currency {
        self.currencies()
            .into_iter()
            .find(|c| c.name() == self.selected)
            .unwrap_or_else(|| Currency::new(self.selected.clone(), self.selected.clone()))
    }

    pub fn format(&self, amount: Amount) -> String {
        self.currency().format(amount, self.position)
    }
}
