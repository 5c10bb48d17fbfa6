//! [`Hotel`] form schema.

use std::collections::HashSet;

use serde::Deserialize;
use validator::{Validate, ValidationError};

#[cfg(doc)]
use crate::domain::{Hotel, Room};
use crate::{
    command::{create_hotel::RoomDraft, CreateHotel, UpdateHotel},
    domain::hotel,
};

use super::{add_nested, error, parsed, room, Errors};

/// Unvalidated [`Hotel`] form input.
#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct Input {
    /// [`hotel::Name`] of the [`Hotel`].
    #[validate(custom(function = "self::name"))]
    pub name: Option<String>,

    /// [`hotel::Location`] of the [`Hotel`].
    #[validate(custom(function = "self::location"))]
    pub location: Option<String>,

    /// [`Room`]s of the [`Hotel`].
    #[validate(nested)]
    pub rooms: Option<Vec<room::Input>>,

    /// Availability of the [`Hotel`].
    pub active: Option<bool>,
}

impl Input {
    /// Validates this [`Input`], requiring every field on `creation`.
    fn check(&self, creation: bool) -> Result<(), Errors> {
        let mut errors = self.validate().err().unwrap_or_default();

        if creation && self.name.is_none() {
            errors.add("name", error("required", "Name is required"));
        }
        if creation && self.location.is_none() {
            errors.add("location", error("required", "Location is required"));
        }
        match &self.rooms {
            None if creation => errors.add("rooms", no_rooms()),
            Some(rooms) if rooms.is_empty() => errors.add("rooms", no_rooms()),
            Some(rooms) => {
                let mut ids = HashSet::new();
                for (i, room) in rooms.iter().enumerate() {
                    for (field, e) in room.draft_errors() {
                        add_nested(&mut errors, "rooms", i, field, e);
                    }
                    let id = room.id.as_deref().map(str::trim);
                    if id.is_some_and(|id| !ids.insert(id)) {
                        let e = error("duplicate", "Duplicate room ID");
                        add_nested(&mut errors, "rooms", i, "id", e);
                    }
                }
            }
            None => {}
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Converts the validated `rooms` into [`RoomDraft`]s.
    fn drafts(rooms: Vec<room::Input>) -> Result<Vec<RoomDraft>, Errors> {
        rooms
            .into_iter()
            .map(|r| r.into_draft().ok_or_else(super::malformed))
            .collect()
    }
}

/// Validates a new [`Hotel`].
///
/// # Errors
///
/// With every failed field if the `input` is invalid.
pub fn create(input: Input) -> Result<CreateHotel, Errors> {
    input.check(true)?;

    Ok(CreateHotel {
        name: parsed(input.name.as_ref(), hotel::Name::new)
            .ok_or_else(super::malformed)?,
        location: parsed(input.location.as_ref(), hotel::Location::new)
            .ok_or_else(super::malformed)?,
        rooms: Input::drafts(input.rooms.unwrap_or_default())?,
    })
}

/// Validates changes of the [`Hotel`] with the provided `id`.
///
/// Every field is optional, though provided ones follow the same rules as on
/// creation.
///
/// # Errors
///
/// With every failed field if the `input` is invalid.
pub fn update(id: hotel::Id, input: Input) -> Result<UpdateHotel, Errors> {
    input.check(false)?;

    Ok(UpdateHotel {
        id,
        name: parsed(input.name.as_ref(), hotel::Name::new),
        location: parsed(input.location.as_ref(), hotel::Location::new),
        rooms: input.rooms.map(Input::drafts).transpose()?,
        active: input.active,
    })
}

/// Error of an empty list of [`Room`]s.
fn no_rooms() -> ValidationError {
    error("length", "At least one room is required")
}

/// Requires the `value` to be a [`hotel::Name`].
fn name(value: &str) -> Result<(), ValidationError> {
    super::text(value, hotel::Name::new, "Name is required", "Name is too long")
}

/// Requires the `value` to be a [`hotel::Location`].
fn location(value: &str) -> Result<(), ValidationError> {
    super::text(
        value,
        hotel::Location::new,
        "Location is required",
        "Location is too long",
    )
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use crate::{
        domain::hotel,
        schema::{failed, room},
    };

    use super::{create, update, Input};

    fn normal() -> room::Input {
        room::Input {
            kind: Some("Normal".into()),
            base_cost: Some(Decimal::from(170)),
            taxes: Some(Decimal::from(30)),
            ..room::Input::default()
        }
    }

    #[test]
    fn creates_trimmed_hotel() {
        let cmd = create(Input {
            name: Some("  Casa Azul ".into()),
            location: Some("Lima, Perú".into()),
            rooms: Some(vec![normal(), normal()]),
            active: None,
        })
        .unwrap();

        assert_eq!(cmd.name.to_string(), "Casa Azul");
        assert_eq!(cmd.rooms.len(), 2);
    }

    #[test]
    fn reports_every_failed_field() {
        let errors = failed(create(Input {
            name: Some("   ".into()),
            location: None,
            rooms: Some(vec![
                normal(),
                room::Input {
                    base_cost: Some(Decimal::from(-3)),
                    kind: None,
                    ..normal()
                },
            ]),
            active: None,
        }));

        assert_eq!(errors["name"], "Name is required");
        assert_eq!(errors["location"], "Location is required");
        assert_eq!(
            errors["rooms[1].baseCost"],
            "Base cost must be a positive number",
        );
        assert_eq!(errors["rooms[1].type"], "Room type is required");
        assert!(!errors.contains_key("rooms[0].baseCost"));
    }

    #[test]
    fn requires_at_least_one_room() {
        let errors = failed(create(Input {
            name: Some("Casa Azul".into()),
            location: Some("Lima".into()),
            rooms: None,
            active: None,
        }));
        assert_eq!(errors["rooms"], "At least one room is required");

        let errors = failed(update(
            hotel::Id::new(),
            Input {
                rooms: Some(vec![]),
                ..Input::default()
            },
        ));
        assert_eq!(errors["rooms"], "At least one room is required");
    }

    #[test]
    fn updates_only_provided_fields() {
        let id = hotel::Id::new();

        let cmd = update(
            id,
            Input {
                active: Some(false),
                ..Input::default()
            },
        )
        .unwrap();

        assert_eq!(cmd.id, id);
        assert_eq!(cmd.active, Some(false));
        assert!(cmd.name.is_none());
        assert!(cmd.rooms.is_none());

        let errors = failed(update(
            id,
            Input {
                name: Some(String::new()),
                ..Input::default()
            },
        ));
        assert_eq!(errors["name"], "Name is required");
    }

    #[test]
    fn rejects_duplicate_room_ids() {
        let id = hotel::room::Id::new().to_string();
        let with_id = |id: &str| room::Input {
            id: Some(id.into()),
            ..normal()
        };

        let errors = failed(update(
            hotel::Id::new(),
            Input {
                rooms: Some(vec![with_id(&id), normal(), with_id(&id)]),
                ..Input::default()
            },
        ));
        assert_eq!(errors["rooms[2].id"], "Duplicate room ID");
        assert!(!errors.contains_key("rooms[0].id"));
        assert_eq!(errors.len(), 1);

        let other = hotel::room::Id::new().to_string();
        let cmd = update(
            hotel::Id::new(),
            Input {
                rooms: Some(vec![with_id(&id), with_id(&other), normal()]),
                ..Input::default()
            },
        )
        .unwrap();
        assert_eq!(cmd.rooms.map(|r| r.len()), Some(3));
    }
}
