//! Monetary amounts in integer minor units.
//!
//! Every amount in the storefront is held as an `i64` count of the smallest
//! currency unit (cents, paise). Decimal values only appear at the edges:
//! parsing catalog prices and formatting totals for display.
//!
//! Arithmetic is checked: an operation whose result would not fit returns
//! `None` instead of wrapping or saturating.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Number of fractional digits carried by every supported currency.
const MINOR_UNIT_DIGITS: u32 = 2;

/// Errors converting into [`Money`] or [`CurrencyCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// Input is not a decimal number.
    #[error("invalid amount: {0}")]
    Invalid(String),
    /// More fractional digits than the minor unit can hold.
    #[error("amount {0} has more than two decimal places")]
    TooPrecise(Decimal),
    /// Negative amounts are never valid prices.
    #[error("amount {0} is negative")]
    Negative(Decimal),
    /// Does not fit in the minor-unit range.
    #[error("amount {0} is out of range")]
    OutOfRange(Decimal),
    /// Unrecognized ISO 4217 code.
    #[error("unsupported currency: {0}")]
    UnknownCurrency(String),
}

/// A non-negative amount of money in minor units.
///
/// ```
/// use kalartz_core::{CurrencyCode, Money};
///
/// let price: Money = "5.50".parse().unwrap();
/// let total = Money::from_minor_units(1000)
///     .checked_add(price.checked_times(2).unwrap())
///     .unwrap();
/// assert_eq!(total.display(CurrencyCode::USD), "$21.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero in any currency.
    pub const ZERO: Self = Self(0);

    /// Create an amount from a count of minor units (e.g. cents).
    #[must_use]
    pub const fn from_minor_units(minor: i64) -> Self {
        Self(minor)
    }

    /// Convert a decimal major-unit amount (e.g. `10.25`) into minor units.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError` if the amount is negative, has more than two
    /// fractional digits, or overflows `i64` minor units.
    pub fn from_decimal(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative(amount));
        }
        if amount.normalize().scale() > MINOR_UNIT_DIGITS {
            return Err(MoneyError::TooPrecise(amount));
        }
        amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|minor| minor.to_i64())
            .map(Self)
            .ok_or(MoneyError::OutOfRange(amount))
    }

    /// The amount in minor units.
    #[must_use]
    pub const fn minor_units(&self) -> i64 {
        self.0
    }

    /// The amount in major units, always carrying two decimal places.
    #[must_use]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, MINOR_UNIT_DIGITS)
    }

    /// Price of `quantity` units at this unit price, or `None` on overflow.
    #[must_use]
    pub fn checked_times(self, quantity: u32) -> Option<Self> {
        self.0.checked_mul(i64::from(quantity)).map(Self)
    }

    /// Sum of two amounts, or `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.0.checked_add(rhs.0) {
            Some(sum) => Some(Self(sum)),
            None => None,
        }
    }

    /// Difference of two amounts, or `None` if it would be negative.
    #[must_use]
    pub const fn checked_sub(self, rhs: Self) -> Option<Self> {
        match self.0.checked_sub(rhs.0) {
            Some(diff) if diff >= 0 => Some(Self(diff)),
            _ => None,
        }
    }

    /// Sum of every amount, or `None` if the total would not fit.
    pub fn checked_sum<I: IntoIterator<Item = Self>>(amounts: I) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, Self::checked_add)
    }

    /// Whether this is exactly zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Format for display in the given currency (e.g. `"$19.99"`).
    #[must_use]
    pub fn display(&self, currency: CurrencyCode) -> String {
        format!("{}{}", currency.symbol(), self.to_decimal())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim()).map_err(|_| MoneyError::Invalid(s.to_owned()))?;
        Self::from_decimal(amount)
    }
}

/// ISO 4217 currency codes the storefront can display.
///
/// A storefront runs in exactly one currency; amounts are never converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    INR,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// Display symbol placed before the amount.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD => "$",
            Self::INR => "₹",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::INR => "INR",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "INR" => Ok(Self::INR),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            _ => Err(MoneyError::UnknownCurrency(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_major_units() {
        assert_eq!("10.00".parse::<Money>().unwrap().minor_units(), 1000);
        assert_eq!("5.5".parse::<Money>().unwrap().minor_units(), 550);
        assert_eq!("0".parse::<Money>().unwrap(), Money::ZERO);
    }

    #[test]
    fn test_trailing_zeros_are_not_extra_precision() {
        assert_eq!("1.2500".parse::<Money>().unwrap().minor_units(), 125);
    }

    #[test]
    fn test_rejects_sub_cent_amounts() {
        assert!(matches!(
            "0.001".parse::<Money>(),
            Err(MoneyError::TooPrecise(_))
        ));
    }

    #[test]
    fn test_rejects_negative_and_garbage() {
        assert!(matches!("-1.00".parse::<Money>(), Err(MoneyError::Negative(_))));
        assert!(matches!("ten".parse::<Money>(), Err(MoneyError::Invalid(_))));
    }

    #[test]
    fn test_sum_has_no_float_drift() {
        // 0.10 summed ten times is exactly 1.00
        let dime = Money::from_minor_units(10);
        let total = Money::checked_sum(std::iter::repeat_n(dime, 10));
        assert_eq!(total, Some(Money::from_minor_units(100)));
    }

    #[test]
    fn test_checked_times() {
        let price = Money::from_minor_units(550);
        assert_eq!(price.checked_times(2), Some(Money::from_minor_units(1100)));
        assert_eq!(price.checked_times(0), Some(Money::ZERO));
        assert_eq!(Money::from_minor_units(i64::MAX).checked_times(2), None);
    }

    #[test]
    fn test_overflow_is_reported_not_saturated() {
        let near_max = Money::from_minor_units(i64::MAX - 1);
        assert_eq!(near_max.checked_add(Money::from_minor_units(1)), Some(Money::from_minor_units(i64::MAX)));
        assert_eq!(near_max.checked_add(Money::from_minor_units(2)), None);
        assert_eq!(Money::checked_sum([near_max, near_max]), None);
    }

    #[test]
    fn test_checked_sub_never_goes_negative() {
        let ten = Money::from_minor_units(1000);
        assert_eq!(ten.checked_sub(Money::from_minor_units(400)), Some(Money::from_minor_units(600)));
        assert_eq!(ten.checked_sub(ten), Some(Money::ZERO));
        assert_eq!(Money::from_minor_units(1).checked_sub(ten), None);
    }

    #[test]
    fn test_display_in_currency() {
        let amount = Money::from_minor_units(2100);
        assert_eq!(amount.display(CurrencyCode::USD), "$21.00");
        assert_eq!(amount.display(CurrencyCode::INR), "₹21.00");
        assert_eq!(Money::ZERO.display(CurrencyCode::GBP), "£0.00");
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!("inr".parse::<CurrencyCode>().unwrap(), CurrencyCode::INR);
        assert!("XYZ".parse::<CurrencyCode>().is_err());
    }
}
