//! Type-safe price representation using decimal arithmetic.
//!
//! The shop trades in Tunisian dinar, which carries three fraction digits
//! (millimes). All amounts are `rust_decimal::Decimal` to keep catalog
//! prices and cart totals exact.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dinars, not millimes).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in the shop's default currency.
    #[must_use]
    pub const fn dinars(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::TND)
    }

    /// Format for display (e.g., `"129.500 TND"`).
    #[must_use]
    pub fn display(&self) -> String {
        let digits = usize::from(self.currency_code.fraction_digits());
        format!("{:.*} {}", digits, self.amount, self.currency_code.code())
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    /// Tunisian dinar (3 fraction digits).
    #[default]
    TND,
    EUR,
    USD,
}

impl CurrencyCode {
    /// Number of fraction digits carried by the currency.
    #[must_use]
    pub const fn fraction_digits(self) -> u8 {
        match self {
            Self::TND => 3,
            Self::EUR | Self::USD => 2,
        }
    }

    /// ISO 4217 alphabetic code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::TND => "TND",
            Self::EUR => "EUR",
            Self::USD => "USD",
        }
    }
}

/// Format a bare amount in the shop's default currency.
///
/// Shorthand for `Price::dinars(amount).display()`, used wherever the
/// backend deals in unlabeled dinar amounts.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    Price::dinars(amount).display()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromPrimitive;

    #[test]
    fn test_display_pads_to_three_digits() {
        let price = Price::dinars(Decimal::new(1295, 1)); // 129.5
        assert_eq!(price.display(), "129.500 TND");
    }

    #[test]
    fn test_display_rounds_excess_scale() {
        let amount = Decimal::from_f64(59.990_4).unwrap();
        assert_eq!(format_amount(amount), "59.990 TND");
    }

    #[test]
    fn test_display_other_currency() {
        let price = Price::new(Decimal::new(1999, 2), CurrencyCode::EUR);
        assert_eq!(price.display(), "19.99 EUR");
    }

    #[test]
    fn test_fraction_digits() {
        assert_eq!(CurrencyCode::TND.fraction_digits(), 3);
        assert_eq!(CurrencyCode::EUR.fraction_digits(), 2);
    }
}
