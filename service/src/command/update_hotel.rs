//! [`Command`] for updating an existing [`Hotel`].

use std::collections::HashSet;

use common::operations::{By, Commit, Select, Transact, Transacted, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Room;
use crate::{
    domain::{hotel, Hotel, Reservation},
    infra::{database, Database},
    read, Service,
};

use super::{create_hotel::RoomDraft, Command};

/// [`Command`] for updating an existing [`Hotel`].
///
/// Only the provided fields are changed. Repeated [`Room`] IDs get fresh ones,
/// and a [`Room`] held by a [`Reservation`] cannot be made available.
#[derive(Clone, Debug)]
pub struct UpdateHotel {
    /// ID of the [`Hotel`] to update.
    pub id: hotel::Id,

    /// New name of the [`Hotel`].
    pub name: Option<hotel::Name>,

    /// New location of the [`Hotel`].
    pub location: Option<hotel::Location>,

    /// New [`Room`]s replacing all the current ones of the [`Hotel`].
    pub rooms: Option<Vec<RoomDraft>>,

    /// New availability of the [`Hotel`].
    pub active: Option<bool>,
}

impl<Db> Command<UpdateHotel> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Hotel>, hotel::Id>>,
            Ok = Option<Hotel>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Reservation>, read::reservation::list::Filter>>,
            Ok = Vec<Reservation>,
            Err = Traced<database::Error>,
        > + Database<Update<Hotel>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Hotel;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateHotel) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateHotel {
            id,
            name,
            location,
            rooms,
            active,
        } = cmd;

        if rooms.as_ref().is_some_and(Vec::is_empty) {
            return Err(tracerr::new!(E::NoRooms));
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut hotel = tx
            .execute(Select(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::HotelNotExists(id))
            .map_err(tracerr::wrap!())?;

        if let Some(name) = name {
            hotel.name = name;
        }
        if let Some(location) = location {
            hotel.location = location;
        }
        if let Some(active) = active {
            hotel.active = active;
        }
        if let Some(rooms) = rooms {
            let booked = tx
                .execute(Select(By::<Vec<Reservation>, _>::new(
                    read::reservation::list::Filter {
                        hotel_id: Some(id),
                        room_id: None,
                        date: None,
                    },
                )))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .into_iter()
                .map(|r| r.room_id)
                .collect::<HashSet<_>>();

            let mut seen = HashSet::with_capacity(rooms.len());
            let mut replaced = Vec::with_capacity(rooms.len());
            for draft in rooms {
                let room_id = draft.id.filter(|id| seen.insert(*id));
                if let Some(room_id) = room_id.filter(|id| {
                    draft.active == Some(true) && booked.contains(id)
                }) {
                    return Err(tracerr::new!(E::RoomBooked(room_id)));
                }
                // Kept rooms retain their availability unless stated.
                let active = draft.active.or_else(|| {
                    room_id.and_then(|id| hotel.room(id)).map(|r| r.active)
                });
                replaced.push(
                    RoomDraft {
                        id: room_id,
                        active,
                        ..draft
                    }
                    .into_room(),
                );
            }
            hotel.rooms = replaced;
        }

        tx.execute(Update(hotel.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(hotel)
    }
}

/// Error of [`UpdateHotel`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Hotel`] with the provided ID does not exist.
    #[display("`Hotel(id: {_0})` does not exist")]
    HotelNotExists(#[error(not(source))] hotel::Id),

    /// [`Hotel`] would be left without [`Room`]s.
    #[display("`Hotel` must have at least one `Room`")]
    NoRooms,

    /// [`Room`] with the provided ID is held by a [`Reservation`].
    #[display("`Room(id: {_0})` is booked")]
    RoomBooked(#[error(not(source))] hotel::room::Id),
}

#[cfg(test)]
mod spec {
    use common::Money;

    use crate::{
        command::{
            create_hotel::RoomDraft, create_reservation::spec::booking,
            Command as _,
        },
        domain::hotel::{self, room},
        query::{self, Query as _},
        read, spec,
    };

    use super::{ExecutionError, UpdateHotel};

    fn patch(id: hotel::Id) -> UpdateHotel {
        UpdateHotel {
            id,
            name: None,
            location: None,
            rooms: None,
            active: None,
        }
    }

    #[tokio::test]
    async fn changes_only_provided_fields() {
        let svc = spec::service();
        let hotel = spec::hotels(&svc).await.remove(0);

        let updated = svc
            .execute(UpdateHotel {
                active: Some(false),
                ..patch(hotel.id)
            })
            .await
            .unwrap();

        assert!(!updated.active);
        assert_eq!(updated.name, hotel.name);
        assert_eq!(updated.rooms.len(), hotel.rooms.len());

        let active = svc
            .execute(query::hotels::List::by(read::hotel::list::Filter {
                active: Some(true),
            }))
            .await
            .unwrap();
        assert!(active.iter().all(|h| h.id != hotel.id));
    }

    #[tokio::test]
    async fn replaces_rooms_keeping_given_ids() {
        let svc = spec::service();
        let mut hotel = spec::hotels(&svc).await.remove(0);
        // Simulates a booked room.
        hotel.rooms[0].active = false;
        let kept = hotel.rooms[0].id;
        _ = svc.execute(UpdateHotel {
            rooms: Some(
                hotel
                    .rooms
                    .iter()
                    .map(|r| RoomDraft {
                        id: Some(r.id),
                        kind: r.kind,
                        base_cost: r.base_cost,
                        taxes: r.taxes,
                        max_guests: Some(r.max_guests),
                        active: Some(r.active),
                    })
                    .collect(),
            ),
            ..patch(hotel.id)
        })
        .await
        .unwrap();

        let updated = svc
            .execute(UpdateHotel {
                rooms: Some(vec![
                    RoomDraft {
                        id: Some(kept),
                        kind: room::Kind::Suite,
                        base_cost: Money::from_units(400),
                        taxes: Money::from_units(60),
                        max_guests: None,
                        active: None,
                    },
                    RoomDraft {
                        id: None,
                        kind: room::Kind::Barata,
                        base_cost: Money::from_units(50),
                        taxes: Money::from_units(5),
                        max_guests: room::MaxGuests::new(3),
                        active: None,
                    },
                ]),
                ..patch(hotel.id)
            })
            .await
            .unwrap();

        assert_eq!(updated.rooms.len(), 2);
        assert_eq!(updated.rooms[0].id, kept);
        assert!(!updated.rooms[0].active);
        assert_eq!(updated.rooms[0].price, Money::from_units(460));
        assert_ne!(updated.rooms[1].id, kept);
        assert!(updated.rooms[1].active);
        assert_eq!(updated.rooms[1].price, Money::from_units(55));
    }

    #[tokio::test]
    async fn gives_repeated_room_ids_fresh_ones() {
        let svc = spec::service();
        let hotel = spec::hotels(&svc).await.remove(0);
        let kept = hotel.rooms[0].id;
        let draft = RoomDraft {
            id: Some(kept),
            kind: room::Kind::Normal,
            base_cost: Money::from_units(100),
            taxes: Money::from_units(10),
            max_guests: None,
            active: None,
        };

        let updated = svc
            .execute(UpdateHotel {
                rooms: Some(vec![draft.clone(), draft]),
                ..patch(hotel.id)
            })
            .await
            .unwrap();

        assert_eq!(updated.rooms.len(), 2);
        assert_eq!(updated.rooms[0].id, kept);
        assert_ne!(updated.rooms[1].id, kept);
    }

    #[tokio::test]
    async fn refuses_to_reenable_booked_room() {
        let svc = spec::service();
        let hotel = spec::hotels(&svc).await.remove(0);
        let booked = &hotel.rooms[0];
        _ = svc
            .execute(booking(hotel.id, booked.id, 1))
            .await
            .unwrap();
        let drafts = |active| {
            vec![RoomDraft {
                id: Some(booked.id),
                kind: booked.kind,
                base_cost: booked.base_cost,
                taxes: booked.taxes,
                max_guests: Some(booked.max_guests),
                active,
            }]
        };

        let err = svc
            .execute(UpdateHotel {
                rooms: Some(drafts(Some(true))),
                ..patch(hotel.id)
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::RoomBooked(id) if *id == booked.id,
        ));

        let updated = svc
            .execute(UpdateHotel {
                rooms: Some(drafts(None)),
                ..patch(hotel.id)
            })
            .await
            .unwrap();
        assert!(!updated.rooms[0].active);
    }

    #[tokio::test]
    async fn fails_on_unknown_hotel() {
        let svc = spec::service();

        let err = svc.execute(patch(hotel::Id::new())).await.unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::HotelNotExists(_)));
    }

    #[tokio::test]
    async fn refuses_to_drop_all_rooms() {
        let svc = spec::service();
        let hotel = spec::hotels(&svc).await.remove(0);

        let err = svc
            .execute(UpdateHotel {
                rooms: Some(vec![]),
                ..patch(hotel.id)
            })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::NoRooms));
    }
}
