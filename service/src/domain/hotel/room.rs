//! [`Room`] definitions.

use common::{define_kind, Money};
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::Hotel;

/// Bookable room of a [`Hotel`].
#[derive(Clone, Debug)]
pub struct Room {
    /// ID of this [`Room`].
    pub id: Id,

    /// [`Kind`] of this [`Room`].
    pub kind: Kind,

    /// Base cost of a stay in this [`Room`].
    pub base_cost: Money,

    /// Taxes charged on top of the base cost.
    pub taxes: Money,

    /// Total price of this [`Room`].
    ///
    /// Always equals `base_cost + taxes`, see [`Room::reprice()`].
    pub price: Money,

    /// [`MaxGuests`] this [`Room`] accommodates.
    pub max_guests: MaxGuests,

    /// Indicator whether this [`Room`] can be booked.
    pub active: bool,
}

impl Room {
    /// Creates a new active [`Room`] with a fresh [`Id`] and the price
    /// computed from the provided costs.
    #[must_use]
    pub fn new(
        kind: Kind,
        base_cost: Money,
        taxes: Money,
        max_guests: MaxGuests,
    ) -> Self {
        Self {
            id: Id::new(),
            kind,
            base_cost,
            taxes,
            price: base_cost + taxes,
            max_guests,
            active: true,
        }
    }

    /// Recomputes the price of this [`Room`] from its base cost and taxes.
    pub fn reprice(&mut self) {
        self.price = self.base_cost + self.taxes;
    }

    /// Indicates whether this [`Room`] fits the provided number of guests.
    #[must_use]
    pub fn fits(&self, guests: u16) -> bool {
        guests <= self.max_guests.get()
    }
}

/// ID of a [`Room`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

define_kind! {
    #[doc = "Tier of a [`Room`]."]
    #[case = "PascalCase"]
    enum Kind {
        #[doc = "Premium tier."]
        Suite = 1,

        #[doc = "Standard tier."]
        Normal = 2,

        #[doc = "Budget tier."]
        Barata = 3,
    }
}

/// Maximum number of guests a [`Room`] accommodates.
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
pub struct MaxGuests(u16);

impl MaxGuests {
    /// [`MaxGuests`] of a [`Room`] created without an explicit capacity.
    pub const DEFAULT: Self = Self(1);

    /// Creates a new [`MaxGuests`] without checking the `count`.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `count` is positive.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub const unsafe fn new_unchecked(count: u16) -> Self {
        Self(count)
    }

    /// Creates a new [`MaxGuests`] if the given `count` is positive.
    #[must_use]
    pub fn new(count: u16) -> Option<Self> {
        (count > 0).then_some(Self(count))
    }

    /// Returns the number of guests.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl Default for MaxGuests {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::Money;

    use super::{Kind, MaxGuests, Room};

    #[test]
    fn price_is_base_cost_plus_taxes() {
        let mut room = Room::new(
            Kind::Normal,
            Money::from_units(170),
            Money::from_units(30),
            MaxGuests::new(5).unwrap(),
        );
        assert_eq!(room.price, Money::from_units(200));

        room.base_cost = Money::from_units(200);
        room.price = Money::from_units(1);
        room.reprice();
        assert_eq!(room.price, Money::from_units(230));
    }

    #[test]
    fn max_guests_is_positive() {
        assert!(MaxGuests::new(0).is_none());
        assert_eq!(MaxGuests::new(3).map(MaxGuests::get), Some(3));
        assert_eq!(MaxGuests::default().get(), 1);
    }

    #[test]
    fn fits_up_to_max_guests() {
        let room = Room::new(
            Kind::Barata,
            Money::from_units(90),
            Money::from_units(10),
            MaxGuests::new(2).unwrap(),
        );
        assert!(room.fits(1));
        assert!(room.fits(2));
        assert!(!room.fits(3));
    }

    #[test]
    fn kind_uses_pascal_case() {
        assert_eq!(Kind::Suite.to_string(), "Suite");
        assert_eq!(Kind::from_str("Barata").unwrap(), Kind::Barata);
        assert!(Kind::from_str("suite").is_err());
        assert_eq!(Kind::all().count(), 3);
    }
}
