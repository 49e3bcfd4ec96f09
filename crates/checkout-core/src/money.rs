//! # Money Module
//!
//! Provides the `Money` type used for every price, adjustment and total.
//!
//! ## Integer Cents
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  FLOATING POINT AT THE TILL                                             │
//! │                                                                         │
//! │  With f64:                                                              │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │    → every total needs a rounding step to hide the residue              │
//! │                                                                         │
//! │  With cents (i64):                                                      │
//! │    21900 + 274995 - 25000 = 271895                                      │
//! │    → exact, rounding to 2 decimals is the identity                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::money::Money;
//!
//! let price: Money = "109.50".parse().unwrap();
//! assert_eq!(price.cents(), 10950);
//!
//! let bundle = price * 3;
//! assert_eq!(bundle.to_string(), "$328.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::error::MoneyParseError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: adjustments from pricing rules are negative
/// - **Single field tuple struct**: zero-cost wrapper over i64
/// - **Serializes as cents**: `Money::from_cents(54999)` is `54999` in JSON
///
/// ## Where Money Flows
/// ```text
/// Product.price ──► Checkout.subtotal ──┐
///                                       ├──► Checkout.total
/// PricingRule.apply ──► discount ───────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let price = Money::from_cents(54999); // $549.99
    /// assert_eq!(price.cents(), 54999);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let price = Money::from_major_minor(1399, 99); // $1399.99
    /// assert_eq!(price.cents(), 139999);
    ///
    /// let refund = Money::from_major_minor(-30, 0); // -$30.00
    /// assert_eq!(refund.cents(), -3000);
    /// ```
    ///
    /// ## Note
    /// For negative amounts only the major unit carries the sign.
    /// `from_major_minor(-5, 50)` = -$5.50, not -$4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(10950).dollars(), 109);
    /// assert_eq!(Money::from_cents(-550).dollars(), -5);
    /// ```
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion, always 0-99.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a decimal amount such as `"549.99"`, `"109.5"`, `"30"` or `"-5.50"`.
///
/// At most two fractional digits are accepted; anything finer than a cent
/// is rejected rather than rounded.
///
/// ## Example
/// ```rust
/// use checkout_core::money::Money;
///
/// assert_eq!("549.99".parse::<Money>().unwrap().cents(), 54999);
/// assert_eq!("109.5".parse::<Money>().unwrap().cents(), 10950);
/// assert!("1.999".parse::<Money>().is_err());
/// ```
impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (negative, unsigned) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };

        let (major, minor) = match unsigned.split_once('.') {
            Some((major, minor)) => (major, Some(minor)),
            None => (unsigned, None),
        };

        if major.is_empty() || !major.chars().all(|c| c.is_ascii_digit()) {
            return Err(MoneyParseError::Invalid(input.to_string()));
        }

        let major: i64 = major
            .parse()
            .map_err(|_| MoneyParseError::Invalid(input.to_string()))?;

        let minor = match minor {
            None => 0,
            Some(digits) if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) => {
                return Err(MoneyParseError::Invalid(input.to_string()));
            }
            Some(digits) if digits.len() > 2 => {
                return Err(MoneyParseError::TooPrecise(input.to_string()));
            }
            // "5" after the point means 50 cents
            Some(digits) if digits.len() == 1 => digits.parse::<i64>().unwrap_or(0) * 10,
            Some(digits) => digits.parse::<i64>().unwrap_or(0),
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| MoneyParseError::Invalid(input.to_string()))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$1399.99` / `-$30.00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Negation turns a discount amount into an adjustment.
impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Multiplication by a quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
