//! [`Reservation`] form schema.

use common::Date;
use serde::Deserialize;
use validator::{Validate, ValidationError};

#[cfg(doc)]
use crate::domain::{Hotel, Reservation};
use crate::{
    command::CreateReservation,
    domain::{
        hotel,
        reservation::{self, Guest},
        user, Room,
    },
};

use super::{error, parsed, text, Errors};

/// Unvalidated [`Reservation`] form input.
#[derive(Clone, Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    /// ID of the [`Hotel`] to book.
    #[validate(
        required(message = "Hotel is required"),
        custom(function = "self::hotel_id")
    )]
    pub hotel_id: Option<String>,

    /// ID of the [`Room`] to book.
    #[validate(
        required(message = "Room is required"),
        custom(function = "self::room_id")
    )]
    pub room_id: Option<String>,

    /// Number of guests staying.
    #[validate(
        required(message = "Number of guests is required"),
        range(min = 1, max = 65535, message = "At least one guest is required")
    )]
    pub guests: Option<i64>,

    /// Full name of the [`Guest`].
    #[validate(
        required(message = "Name is required"),
        custom(function = "self::name")
    )]
    pub name: Option<String>,

    /// Birth date of the [`Guest`].
    #[validate(
        required(message = "Birth date is required"),
        custom(function = "self::birth_date")
    )]
    pub birth_date: Option<String>,

    /// [`reservation::Gender`] of the [`Guest`].
    #[validate(
        required(message = "Gender is required"),
        custom(function = "self::gender")
    )]
    pub gender: Option<String>,

    /// [`reservation::DocumentKind`] presented by the [`Guest`].
    #[validate(
        required(message = "Document type is required"),
        custom(function = "self::document_type")
    )]
    pub document_type: Option<String>,

    /// Number of the document presented by the [`Guest`].
    #[validate(
        required(message = "Document number is required"),
        custom(function = "self::document_number")
    )]
    pub document_number: Option<String>,

    /// Email of the [`Guest`].
    #[validate(
        required(message = "Email is required"),
        custom(function = "self::email")
    )]
    pub email: Option<String>,

    /// Phone of the [`Guest`].
    #[validate(
        required(message = "Phone is required"),
        custom(function = "self::phone")
    )]
    pub phone: Option<String>,

    /// First day of the stay.
    #[validate(
        required(message = "Check-in date is required"),
        custom(function = "self::check_in")
    )]
    pub check_in: Option<String>,

    /// Last day of the stay.
    #[validate(
        required(message = "Check-out date is required"),
        custom(function = "self::check_out")
    )]
    pub check_out: Option<String>,

    /// Full name of the emergency contact.
    #[validate(
        required(message = "Emergency contact name is required"),
        custom(function = "self::emergency_contact_name")
    )]
    pub emergency_contact_name: Option<String>,

    /// Phone of the emergency contact.
    #[validate(
        required(message = "Emergency contact phone is required"),
        custom(function = "self::emergency_contact_phone")
    )]
    pub emergency_contact_phone: Option<String>,
}

impl Input {
    /// Checks the number of guests against the capacity of the selected
    /// [`Room`], if it's among the offered `rooms`.
    fn capacity_error(&self, rooms: &[Room]) -> Option<ValidationError> {
        let room_id: hotel::room::Id =
            parsed(self.room_id.as_ref(), |s| s.parse().ok())?;
        let guests = u16::try_from(self.guests?).ok()?;
        rooms
            .iter()
            .find(|r| r.id == room_id)
            .is_some_and(|r| !r.fits(guests))
            .then(|| {
                error("capacity", "Number of guests exceeds the room limit")
            })
    }

    /// Converts this validated [`Input`] into a [`CreateReservation`].
    fn into_command(self) -> Option<CreateReservation> {
        let day = |v: Option<&String>| parsed(v, |s| Date::parse(&s).ok());

        Some(CreateReservation {
            hotel_id: parsed(self.hotel_id.as_ref(), |s| s.parse().ok())?,
            room_id: parsed(self.room_id.as_ref(), |s| s.parse().ok())?,
            guest: Guest {
                name: parsed(self.name.as_ref(), reservation::Name::new)?,
                birth_date: day(self.birth_date.as_ref())?.coerce(),
                gender: parsed(self.gender.as_ref(), |s| s.parse().ok())?,
                document_kind: parsed(self.document_type.as_ref(), |s| {
                    s.parse().ok()
                })?,
                document_number: parsed(
                    self.document_number.as_ref(),
                    reservation::DocumentNumber::new,
                )?,
                email: parsed(self.email.as_ref(), user::Email::new)?,
                phone: parsed(self.phone.as_ref(), reservation::Phone::new)?,
                emergency_contact_name: parsed(
                    self.emergency_contact_name.as_ref(),
                    reservation::Name::new,
                )?,
                emergency_contact_phone: parsed(
                    self.emergency_contact_phone.as_ref(),
                    reservation::Phone::new,
                )?,
            },
            check_in: day(self.check_in.as_ref())?.coerce(),
            check_out: day(self.check_out.as_ref())?.coerce(),
            guests: u16::try_from(self.guests?)
                .ok()
                .and_then(reservation::Guests::new)?,
        })
    }
}

/// Validates a new [`Reservation`] against the `rooms` offered to the
/// [`Guest`].
///
/// The number of guests is checked against the capacity of the selected
/// [`Room`] only when it is among the `rooms`. Dates are not checked against
/// each other.
///
/// # Errors
///
/// With every failed field if the `input` is invalid.
pub fn create(
    input: Input,
    rooms: &[Room],
) -> Result<CreateReservation, Errors> {
    let mut errors = input.validate().err().unwrap_or_default();
    if let Some(e) = input.capacity_error(rooms) {
        errors.add("guests", e);
    }
    if !errors.is_empty() {
        return Err(errors);
    }
    input.into_command().ok_or_else(super::malformed)
}

/// Requires the `value` to be a [`hotel::Id`].
fn hotel_id(value: &str) -> Result<(), ValidationError> {
    text(
        value,
        |s| s.parse::<hotel::Id>().ok(),
        "Hotel is required",
        "Invalid hotel ID",
    )
}

/// Requires the `value` to be a [`hotel::room::Id`].
fn room_id(value: &str) -> Result<(), ValidationError> {
    text(
        value,
        |s| s.parse::<hotel::room::Id>().ok(),
        "Room is required",
        "Invalid room ID",
    )
}

fn name(value: &str) -> Result<(), ValidationError> {
    text(
        value,
        reservation::Name::new,
        "Name is required",
        "Name is too long",
    )
}

/// Requires the `value` to be a calendar [`Date`] or an [RFC 3339]
/// timestamp.
///
/// [RFC 3339]: https://tools.ietf.org/html/rfc3339
fn date(
    value: &str,
    required: &'static str,
    invalid: &'static str,
) -> Result<(), ValidationError> {
    text(value, |s| Date::parse(&s).ok(), required, invalid)
}

fn birth_date(value: &str) -> Result<(), ValidationError> {
    date(value, "Birth date is required", "Invalid birth date")
}

fn gender(value: &str) -> Result<(), ValidationError> {
    text(
        value,
        |s| s.parse::<reservation::Gender>().ok(),
        "Gender is required",
        "Invalid gender",
    )
}

fn document_type(value: &str) -> Result<(), ValidationError> {
    text(
        value,
        |s| s.parse::<reservation::DocumentKind>().ok(),
        "Document type is required",
        "Invalid document type",
    )
}

fn document_number(value: &str) -> Result<(), ValidationError> {
    text(
        value,
        reservation::DocumentNumber::new,
        "Document number is required",
        "Document number is too long",
    )
}

fn email(value: &str) -> Result<(), ValidationError> {
    text(value, user::Email::new, "Email is required", "Email is invalid")
}

fn phone(value: &str) -> Result<(), ValidationError> {
    text(
        value,
        reservation::Phone::new,
        "Phone is required",
        "Phone is too long",
    )
}

fn check_in(value: &str) -> Result<(), ValidationError> {
    date(value, "Check-in date is required", "Invalid check-in date")
}

fn check_out(value: &str) -> Result<(), ValidationError> {
    date(value, "Check-out date is required", "Invalid check-out date")
}

fn emergency_contact_name(value: &str) -> Result<(), ValidationError> {
    text(
        value,
        reservation::Name::new,
        "Emergency contact name is required",
        "Emergency contact name is too long",
    )
}

fn emergency_contact_phone(value: &str) -> Result<(), ValidationError> {
    text(
        value,
        reservation::Phone::new,
        "Emergency contact phone is required",
        "Emergency contact phone is too long",
    )
}

#[cfg(test)]
mod spec {
    use common::Money;

    use crate::domain::{
        hotel::room::{self, Room},
        reservation::{DocumentKind, Gender},
    };

    use crate::schema::failed;

    use super::{create, Input};

    fn barata() -> Room {
        Room::new(
            room::Kind::Barata,
            Money::from_units(90),
            Money::from_units(10),
            room::MaxGuests::new(2).unwrap(),
        )
    }

    fn input(room: &Room, guests: i64) -> Input {
        Input {
            hotel_id: Some("0b5d7b0e-3f4a-4f6e-9b39-2f8f3f1c9a10".into()),
            room_id: Some(room.id.to_string()),
            guests: Some(guests),
            name: Some("Ana Pérez".into()),
            birth_date: Some("1990-01-01".into()),
            gender: Some("Femenino".into()),
            document_type: Some("Pasaporte".into()),
            document_number: Some("AB123456".into()),
            email: Some("ana@example.com".into()),
            phone: Some("+57 300 123 4567".into()),
            check_in: Some("2025-03-10T15:00:00Z".into()),
            check_out: Some("2025-03-12".into()),
            emergency_contact_name: Some("Luis Pérez".into()),
            emergency_contact_phone: Some("+57 300 765 4321".into()),
        }
    }

    #[test]
    fn builds_reservation_command() {
        let room = barata();

        let cmd = create(input(&room, 2), &[room.clone()]).unwrap();

        assert_eq!(cmd.room_id, room.id);
        assert_eq!(cmd.guests.get(), 2);
        assert_eq!(cmd.guest.gender, Gender::Female);
        assert_eq!(cmd.guest.document_kind, DocumentKind::Passport);
        assert_eq!(cmd.check_in.to_string(), "2025-03-10");
        assert_eq!(cmd.check_out.to_string(), "2025-03-12");
    }

    #[test]
    fn rejects_guests_above_room_capacity() {
        let room = barata();

        let errors = failed(create(input(&room, 3), &[room.clone()]));
        assert_eq!(errors["guests"], "Number of guests exceeds the room limit");
        assert_eq!(errors.len(), 1);

        // Rooms outside the offered ones are left to the booking itself.
        assert!(create(input(&room, 3), &[]).is_ok());
    }

    #[test]
    fn does_not_compare_dates() {
        let room = barata();

        let cmd = create(
            Input {
                check_in: Some("2025-03-12".into()),
                check_out: Some("2025-03-10".into()),
                ..input(&room, 1)
            },
            &[],
        );
        assert!(cmd.is_ok());
    }

    #[test]
    fn reports_every_missing_field() {
        let errors = failed(create(Input::default(), &[]));

        for field in [
            "hotelId",
            "roomId",
            "guests",
            "name",
            "birthDate",
            "gender",
            "documentType",
            "documentNumber",
            "email",
            "phone",
            "checkIn",
            "checkOut",
            "emergencyContactName",
            "emergencyContactPhone",
        ] {
            assert!(errors.contains_key(field), "`{field}` not reported");
        }
    }

    #[test]
    fn rejects_malformed_values() {
        let room = barata();

        let errors = failed(create(
            Input {
                hotel_id: Some("hotel-1".into()),
                guests: Some(0),
                gender: Some("Female".into()),
                document_type: Some("PASSPORT".into()),
                email: Some("ana@".into()),
                birth_date: Some("01/01/1990".into()),
                name: Some("   ".into()),
                ..input(&room, 1)
            },
            &[],
        ));

        assert_eq!(errors["hotelId"], "Invalid hotel ID");
        assert_eq!(errors["guests"], "At least one guest is required");
        assert_eq!(errors["gender"], "Invalid gender");
        assert_eq!(errors["documentType"], "Invalid document type");
        assert_eq!(errors["email"], "Email is invalid");
        assert_eq!(errors["birthDate"], "Invalid birth date");
        assert_eq!(errors["name"], "Name is required");
        assert!(!errors.contains_key("roomId"));
    }
}
