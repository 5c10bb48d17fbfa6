//! [`Reservation`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, Date, DateOf, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::{Hotel, Room};
use crate::domain::{hotel, user::Email};

/// Booking of a [`Room`] in a [`Hotel`] by a [`Guest`].
#[derive(Clone, Debug)]
pub struct Reservation {
    /// ID of this [`Reservation`].
    pub id: Id,

    /// ID of the booked [`Hotel`].
    pub hotel_id: hotel::Id,

    /// ID of the booked [`Room`].
    pub room_id: hotel::room::Id,

    /// [`Guest`] who made this [`Reservation`].
    pub guest: Guest,

    /// First day of the stay.
    pub check_in: CheckInDate,

    /// Last day of the stay.
    pub check_out: CheckOutDate,

    /// Number of [`Guests`] staying.
    pub guests: Guests,

    /// [`DateTime`] when this [`Reservation`] was created.
    pub created_at: CreationDateTime,
}

impl Reservation {
    /// Indicates whether the stay of this [`Reservation`] covers the provided
    /// [`Date`] (both ends inclusive).
    #[must_use]
    pub fn covers(&self, date: Date) -> bool {
        self.check_in.coerce() <= date && date <= self.check_out.coerce()
    }
}

/// Contact and identity details of the person booking a [`Reservation`].
#[derive(Clone, Debug)]
pub struct Guest {
    /// Full [`Name`] of the guest.
    pub name: Name,

    /// Birth day of the guest.
    pub birth_date: BirthDate,

    /// [`Gender`] of the guest.
    pub gender: Gender,

    /// Kind of the identity document presented.
    pub document_kind: DocumentKind,

    /// Number of the identity document presented.
    pub document_number: DocumentNumber,

    /// [`Email`] of the guest.
    pub email: Email,

    /// [`Phone`] of the guest.
    pub phone: Phone,

    /// [`Name`] of the emergency contact.
    pub emergency_contact_name: Name,

    /// [`Phone`] of the emergency contact.
    pub emergency_contact_phone: Phone,
}

/// ID of a [`Reservation`].
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

/// Macro defining a non-blank trimmed text newtype.
macro_rules! define_text {
    ($(#[doc = $doc:literal])* $name:ident, $max:literal) => {
        $(#[doc = $doc])*
        #[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
        #[as_ref(forward)]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Creates a new [`", stringify!($name), "`].")]
            ///
            /// # Safety
            ///
            /// The caller must ensure that the given `text` matches the
            /// format.
            #[expect(unsafe_code, reason = "bypass")]
            #[must_use]
            pub unsafe fn new_unchecked(text: impl Into<String>) -> Self {
                Self(text.into())
            }

            #[doc = concat!(
                "Creates a new [`", stringify!($name),
                "`] if the given `text` is valid.",
            )]
            #[must_use]
            pub fn new(text: impl Into<String>) -> Option<Self> {
                let text = text.into();
                Self::check(&text).then_some(Self(text))
            }

            /// Checks whether the given `text` is non-blank, has no
            /// surrounding whitespace and fits the length limit.
            fn check(text: impl AsRef<str>) -> bool {
                let text = text.as_ref();
                text.trim() == text && !text.is_empty() && text.len() <= $max
            }
        }

        impl std::str::FromStr for $name {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s).ok_or(concat!("invalid `", stringify!($name), "`"))
            }
        }
    };
}

define_text!(
    /// Full name of a person mentioned in a [`Reservation`].
    Name,
    512
);

define_text!(
    /// Number of an identity document.
    DocumentNumber,
    64
);

define_text!(
    /// Phone number as entered by a guest, in any numbering plan.
    Phone,
    32
);

define_kind! {
    #[doc = "Gender of a [`Guest`]."]
    #[case = "PascalCase"]
    enum Gender {
        #[doc = "Male."]
        #[rename = "Masculino"]
        Male = 1,

        #[doc = "Female."]
        #[rename = "Femenino"]
        Female = 2,

        #[doc = "Any other gender or undisclosed."]
        #[rename = "Otro"]
        Other = 3,
    }
}

define_kind! {
    #[doc = "Kind of an identity document presented by a [`Guest`]."]
    #[case = "UPPERCASE"]
    enum DocumentKind {
        #[doc = "National identity document."]
        Dni = 1,

        #[doc = "Passport."]
        #[rename = "Pasaporte"]
        Passport = 2,

        #[doc = "Identity card."]
        #[rename = "Cédula"]
        IdCard = 3,
    }
}

/// Number of guests staying under a [`Reservation`].
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
pub struct Guests(u16);

impl Guests {
    /// Creates new [`Guests`] if the given `count` is positive.
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

/// [`Date`] when a [`Reservation`] stay begins.
pub type CheckInDate = DateOf<(Reservation, unit::CheckIn)>;

/// [`Date`] when a [`Reservation`] stay ends.
pub type CheckOutDate = DateOf<(Reservation, unit::CheckOut)>;

/// [`Date`] when a [`Guest`] was born.
pub type BirthDate = DateOf<(Guest, unit::Birth)>;

/// [`DateTime`] when a [`Reservation`] was created.
pub type CreationDateTime = DateTimeOf<(Reservation, unit::Creation)>;

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::{Date, DateTime};

    use super::{
        DocumentKind, DocumentNumber, Gender, Guest, Guests, Id, Name, Phone,
        Reservation,
    };
    use crate::domain::{hotel, user::Email};

    fn reservation(check_in: &str, check_out: &str) -> Reservation {
        Reservation {
            id: Id::new(),
            hotel_id: hotel::Id::new(),
            room_id: hotel::room::Id::new(),
            guest: Guest {
                name: Name::new("Ana Pérez").unwrap(),
                birth_date: Date::parse("1990-01-01").unwrap().coerce(),
                gender: Gender::Female,
                document_kind: DocumentKind::Passport,
                document_number: DocumentNumber::new("AB123456").unwrap(),
                email: Email::new("ana@example.com").unwrap(),
                phone: Phone::new("+57 300 123 4567").unwrap(),
                emergency_contact_name: Name::new("Luis Pérez").unwrap(),
                emergency_contact_phone: Phone::new("+57 300 765 4321")
                    .unwrap(),
            },
            check_in: Date::parse(check_in).unwrap().coerce(),
            check_out: Date::parse(check_out).unwrap().coerce(),
            guests: Guests::new(2).unwrap(),
            created_at: DateTime::now().coerce(),
        }
    }

    #[test]
    fn phone_accepts_any_non_blank_text() {
        assert!(Phone::new("+57 300 123 4567").is_some());
        assert!(Phone::new("(55) 1234-5678").is_some());
        assert!(Phone::new("").is_none());
        assert!(Phone::new(" 123").is_none());
    }

    #[test]
    fn guests_are_positive() {
        assert!(Guests::new(0).is_none());
        assert_eq!(Guests::new(2).map(Guests::get), Some(2));
    }

    #[test]
    fn kinds_render_on_the_wire() {
        assert_eq!(DocumentKind::IdCard.to_string(), "Cédula");
        assert_eq!(
            DocumentKind::from_str("Pasaporte").unwrap(),
            DocumentKind::Passport,
        );
        assert!(DocumentKind::from_str("PASSPORT").is_err());
        assert_eq!(DocumentKind::Dni.to_string(), "DNI");
        assert_eq!(Gender::Female.to_string(), "Femenino");
        assert_eq!(Gender::from_str("Otro").unwrap(), Gender::Other);
        assert!(Gender::from_str("Other").is_err());
        assert!(Gender::from_str("otro").is_err());
    }

    #[test]
    fn coverage_is_inclusive() {
        let reservation = reservation("2025-03-10", "2025-03-12");
        assert!(reservation.covers(Date::parse("2025-03-10").unwrap()));
        assert!(reservation.covers(Date::parse("2025-03-11").unwrap()));
        assert!(reservation.covers(Date::parse("2025-03-12").unwrap()));
        assert!(!reservation.covers(Date::parse("2025-03-13").unwrap()));
        assert!(!reservation.covers(Date::parse("2025-03-09").unwrap()));
    }
}
