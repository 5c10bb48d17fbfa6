//! [`Hotel`] definitions.

pub mod room;

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use self::room::Room;

/// Hotel offering [`Room`]s for reservation.
#[derive(Clone, Debug)]
pub struct Hotel {
    /// ID of this [`Hotel`].
    pub id: Id,

    /// [`Name`] of this [`Hotel`].
    pub name: Name,

    /// [`Location`] of this [`Hotel`].
    pub location: Location,

    /// [`Room`]s of this [`Hotel`], in display order.
    pub rooms: Vec<Room>,

    /// Indicator whether this [`Hotel`] accepts reservations.
    pub active: bool,

    /// [`DateTime`] when this [`Hotel`] was created.
    pub created_at: CreationDateTime,
}

impl Hotel {
    /// Returns the [`Room`] of this [`Hotel`] with the provided ID, if any.
    #[must_use]
    pub fn room(&self, id: room::Id) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// Returns the mutable [`Room`] of this [`Hotel`] with the provided ID, if
    /// any.
    pub fn room_mut(&mut self, id: room::Id) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|r| r.id == id)
    }

    /// Returns the [`Room`]s of this [`Hotel`] that can be booked right now.
    ///
    /// An inactive [`Hotel`] has no bookable [`Room`]s.
    pub fn available_rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(|r| self.active && r.active)
    }

    /// Returns the lowest [`Room`] price of this [`Hotel`], if it has any
    /// [`Room`]s.
    #[must_use]
    pub fn starting_price(&self) -> Option<Money> {
        self.rooms.iter().map(|r| r.price).min()
    }
}

/// ID of a [`Hotel`].
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

/// Name of a [`Hotel`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl std::str::FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Location (city, country) of a [`Hotel`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Location(String);

impl Location {
    /// Creates a new [`Location`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `location` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    /// Creates a new [`Location`] if the given `location` is valid.
    #[must_use]
    pub fn new(location: impl Into<String>) -> Option<Self> {
        let location = location.into();
        Self::check(&location).then_some(Self(location))
    }

    /// Checks whether the given `location` is a valid [`Location`].
    fn check(location: impl AsRef<str>) -> bool {
        let location = location.as_ref();
        location.trim() == location
            && !location.is_empty()
            && location.len() <= 512
    }
}

impl std::str::FromStr for Location {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Location`")
    }
}

/// [`DateTime`] when a [`Hotel`] was created.
pub type CreationDateTime = DateTimeOf<(Hotel, unit::Creation)>;

#[cfg(test)]
mod spec {
    use common::Money;

    use super::{room, Hotel, Id, Location, Name, Room};

    fn hotel(active: bool, rooms: Vec<Room>) -> Hotel {
        Hotel {
            id: Id::new(),
            name: Name::new("Hotel Paradise").unwrap(),
            location: Location::new("Cartagena, Colombia").unwrap(),
            rooms,
            active,
            created_at: super::CreationDateTime::now(),
        }
    }

    fn room(kind: room::Kind, base: u32, active: bool) -> Room {
        let mut room = Room::new(
            kind,
            Money::from_units(base),
            Money::from_units(10),
            room::MaxGuests::new(2).unwrap(),
        );
        room.active = active;
        room
    }

    #[test]
    fn names_are_trimmed_and_non_empty() {
        assert!(Name::new("Sunset Resort").is_some());
        assert!(Name::new(" Sunset Resort").is_none());
        assert!(Name::new("").is_none());
        assert!(Location::new("Cancún, México").is_some());
        assert!(Location::new("   ").is_none());
    }

    #[test]
    fn finds_rooms_by_id() {
        let suite = room(room::Kind::Suite, 250, true);
        let id = suite.id;
        let hotel = hotel(true, vec![suite, room(room::Kind::Barata, 90, true)]);

        assert_eq!(hotel.room(id).map(|r| r.kind), Some(room::Kind::Suite));
        assert!(hotel.room(room::Id::new()).is_none());
    }

    #[test]
    fn only_active_rooms_of_active_hotels_are_available() {
        let rooms = vec![
            room(room::Kind::Suite, 250, true),
            room(room::Kind::Normal, 170, false),
        ];

        let open = hotel(true, rooms.clone());
        assert_eq!(open.available_rooms().count(), 1);

        let closed = hotel(false, rooms);
        assert_eq!(closed.available_rooms().count(), 0);
    }

    #[test]
    fn starting_price_is_the_cheapest_room() {
        let hotel = hotel(
            true,
            vec![
                room(room::Kind::Suite, 250, true),
                room(room::Kind::Barata, 90, true),
            ],
        );
        assert_eq!(hotel.starting_price(), Some(Money::from_units(100)));
        assert_eq!(super::Hotel { rooms: vec![], ..hotel }.starting_price(), None);
    }
}
