//! [`Money`]-related definitions.

use std::{fmt, ops, str::FromStr};

use rust_decimal::Decimal;

/// Non-negative amount of money in the booking currency.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Money(Decimal);

impl Money {
    /// Zero [`Money`].
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest accepted [`Money`] amount: one trillion units.
    pub const MAX: Self =
        Self(Decimal::from_parts(3_567_587_328, 232, 0, false, 0));

    /// Creates a new [`Money`] if the given `amount` is non-negative and
    /// doesn't exceed [`Money::MAX`].
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        ((!amount.is_sign_negative() || amount.is_zero())
            && amount <= Self::MAX.0)
            .then_some(Self(amount.normalize()))
    }

    /// Adds the `rhs` to this [`Money`], returning [`None`] if the sum exceeds
    /// [`Money::MAX`].
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).and_then(Self::new)
    }

    /// Creates a new [`Money`] from a whole number of units.
    #[must_use]
    pub fn from_units(units: u32) -> Self {
        Self(Decimal::from(units))
    }

    /// Returns the amount of this [`Money`].
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Indicates whether this [`Money`] is strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        !self.0.is_zero()
    }
}

impl ops::Add for Money {
    type Output = Self;

    /// Saturates at [`Decimal::MAX`] instead of overflowing.
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0).normalize())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self(amount) = self;
        if amount.is_integer() {
            write!(f, "${}", amount.trunc())
        } else {
            write!(f, "${:.2}", amount)
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix('$').unwrap_or(s);
        if s.is_empty() {
            return Err("too short");
        }

        let amount = Decimal::from_str(s).map_err(|_| "invalid amount")?;
        if amount > Self::MAX.0 {
            return Err("amount is too large");
        }
        Self::new(amount).ok_or("negative amount")
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.
    //!
    //! [`Money`] travels as a plain JSON number.

    use std::fmt;

    use rust_decimal::{
        prelude::{FromPrimitive as _, ToPrimitive as _},
        Decimal,
    };
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    use super::Money;

    impl Serialize for Money {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            let Money(amount) = self;
            if let Some(units) = amount.is_integer().then(|| amount.to_i64()).flatten()
            {
                s.serialize_i64(units)
            } else {
                s.serialize_f64(amount.to_f64().unwrap_or_default())
            }
        }
    }

    impl<'de> Deserialize<'de> for Money {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            d.deserialize_any(Visitor)
        }
    }

    /// [`de::Visitor`] accepting JSON numbers and numeric strings.
    struct Visitor;

    impl Visitor {
        /// Converts the parsed `amount` into [`Money`].
        fn money<E: de::Error>(amount: Option<Decimal>) -> Result<Money, E> {
            let amount =
                amount.ok_or_else(|| E::custom("amount is out of range"))?;
            if amount > Money::MAX.amount() {
                return Err(E::custom("amount is too large"));
            }
            Money::new(amount)
                .ok_or_else(|| E::custom("amount must not be negative"))
        }
    }

    impl de::Visitor<'_> for Visitor {
        type Value = Money;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative amount of money")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
            Self::money(Some(Decimal::from(v)))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
            Self::money(Some(Decimal::from(v)))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
            Self::money(Decimal::from_f64(v))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
            v.parse().map_err(E::custom)
        }
    }
}
