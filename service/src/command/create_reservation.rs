//! [`Command`] for creating a new [`Reservation`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::Room;
use crate::{
    domain::{
        hotel::{self, room},
        reservation::{self, Guest},
        Hotel, Reservation,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for booking a [`Room`] of a [`Hotel`].
///
/// The booked [`Room`] becomes unavailable once the [`Reservation`] is
/// created.
#[derive(Clone, Debug)]
pub struct CreateReservation {
    /// ID of the [`Hotel`] to book.
    pub hotel_id: hotel::Id,

    /// ID of the [`Room`] to book.
    pub room_id: room::Id,

    /// [`Guest`] booking the [`Room`].
    pub guest: Guest,

    /// First day of the stay.
    pub check_in: reservation::CheckInDate,

    /// Last day of the stay.
    pub check_out: reservation::CheckOutDate,

    /// Number of guests staying.
    pub guests: reservation::Guests,
}

impl<Db> Command<CreateReservation> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Hotel>, hotel::Id>>,
            Ok = Option<Hotel>,
            Err = Traced<database::Error>,
        > + Database<Insert<Reservation>, Err = Traced<database::Error>>
        + Database<Update<Hotel>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Reservation;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateReservation,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateReservation {
            hotel_id,
            room_id,
            guest,
            check_in,
            check_out,
            guests,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut hotel = tx
            .execute(Select(By::new(hotel_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::HotelNotExists(hotel_id))
            .map_err(tracerr::wrap!())?;
        if !hotel.active {
            return Err(tracerr::new!(E::HotelInactive(hotel_id)));
        }

        let room = hotel
            .room_mut(room_id)
            .ok_or(E::RoomNotExists(room_id))
            .map_err(tracerr::wrap!())?;
        if !room.active {
            return Err(tracerr::new!(E::RoomUnavailable(room_id)));
        }
        if !room.fits(guests.get()) {
            return Err(tracerr::new!(E::GuestsExceedCapacity {
                guests,
                max_guests: room.max_guests,
            }));
        }
        room.active = false;

        let reservation = Reservation {
            id: reservation::Id::new(),
            hotel_id,
            room_id,
            guest,
            check_in,
            check_out,
            guests,
            created_at: DateTime::now().coerce(),
        };

        tx.execute(Insert(reservation.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Update(hotel))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!(
            "`Room(id: {room_id})` of `Hotel(id: {hotel_id})` booked by \
             `Reservation(id: {})`",
            reservation.id,
        );

        Ok(reservation)
    }
}

/// Error of [`CreateReservation`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Hotel`] with the provided ID does not exist.
    #[display("`Hotel(id: {_0})` does not exist")]
    HotelNotExists(#[error(not(source))] hotel::Id),

    /// [`Hotel`] with the provided ID is not accepting reservations.
    #[display("`Hotel(id: {_0})` is inactive")]
    HotelInactive(#[error(not(source))] hotel::Id),

    /// [`Room`] with the provided ID does not exist in the [`Hotel`].
    #[display("`Room(id: {_0})` does not exist")]
    RoomNotExists(#[error(not(source))] room::Id),

    /// [`Room`] with the provided ID is already booked or disabled.
    #[display("`Room(id: {_0})` is unavailable")]
    RoomUnavailable(#[error(not(source))] room::Id),

    /// More guests than the [`Room`] accommodates.
    #[display("{guests} guests exceed the `Room` capacity of {max_guests}")]
    GuestsExceedCapacity {
        /// Requested number of guests.
        #[error(not(source))]
        guests: reservation::Guests,

        /// Capacity of the [`Room`].
        #[error(not(source))]
        max_guests: room::MaxGuests,
    },
}

#[cfg(test)]
pub(crate) mod spec {
    use common::Date;

    use crate::{
        command::{update_hotel::UpdateHotel, Command as _},
        domain::{
            hotel::{self, room},
            reservation::{
                DocumentKind, DocumentNumber, Gender, Guest, Guests, Name,
                Phone,
            },
            user::Email,
        },
        query::{self, Query as _},
        read, spec,
    };

    use super::{CreateReservation, ExecutionError};

    pub(crate) fn booking(
        hotel_id: hotel::Id,
        room_id: room::Id,
        guests: u16,
    ) -> CreateReservation {
        CreateReservation {
            hotel_id,
            room_id,
            guest: Guest {
                name: Name::new("Ana Pérez").unwrap(),
                birth_date: Date::parse("1990-01-01").unwrap().coerce(),
                gender: Gender::Female,
                document_kind: DocumentKind::Dni,
                document_number: DocumentNumber::new("12345678").unwrap(),
                email: Email::new("ana@example.com").unwrap(),
                phone: Phone::new("+57 300 123 4567").unwrap(),
                emergency_contact_name: Name::new("Luis Pérez").unwrap(),
                emergency_contact_phone: Phone::new("+57 300 765 4321")
                    .unwrap(),
            },
            check_in: Date::parse("2025-03-10").unwrap().coerce(),
            check_out: Date::parse("2025-03-12").unwrap().coerce(),
            guests: Guests::new(guests).unwrap(),
        }
    }

    async fn reservations_count(svc: &spec::Service) -> usize {
        svc.execute(query::reservations::List::by(
            read::reservation::list::Filter::default(),
        ))
        .await
        .unwrap()
        .len()
    }

    #[tokio::test]
    async fn books_and_deactivates_room() {
        let svc = spec::service();
        let hotel = spec::hotels(&svc).await.remove(0);
        let room = &hotel.rooms[1];

        let reservation = svc
            .execute(booking(hotel.id, room.id, 2))
            .await
            .unwrap();
        assert_eq!(reservation.room_id, room.id);

        let stored = svc
            .execute(query::reservation::ById::by(reservation.id))
            .await
            .unwrap();
        assert!(stored.is_some());

        let disabled = svc
            .execute(query::rooms::Disabled::by(()))
            .await
            .unwrap();
        assert_eq!(
            disabled,
            [read::room::Disabled {
                hotel_id: hotel.id,
                room_id: room.id,
            }],
        );

        let err = svc
            .execute(booking(hotel.id, room.id, 1))
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::RoomUnavailable(_)));
        assert_eq!(reservations_count(&svc).await, 1);
    }

    #[tokio::test]
    async fn fails_on_unknown_hotel_or_room() {
        let svc = spec::service();
        let hotel = spec::hotels(&svc).await.remove(0);

        let err = svc
            .execute(booking(hotel::Id::new(), hotel.rooms[0].id, 1))
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::HotelNotExists(_)));

        let err = svc
            .execute(booking(hotel.id, room::Id::new(), 1))
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::RoomNotExists(_)));

        assert_eq!(reservations_count(&svc).await, 0);
        assert!(svc
            .execute(query::rooms::Disabled::by(()))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn refuses_inactive_hotel() {
        let svc = spec::service();
        let hotel = spec::hotels(&svc).await.remove(1);
        _ = svc
            .execute(UpdateHotel {
                id: hotel.id,
                name: None,
                location: None,
                rooms: None,
                active: Some(false),
            })
            .await
            .unwrap();

        let err = svc
            .execute(booking(hotel.id, hotel.rooms[0].id, 1))
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::HotelInactive(_)));
        assert_eq!(reservations_count(&svc).await, 0);
    }

    #[tokio::test]
    async fn refuses_guests_above_capacity() {
        let svc = spec::service();
        let hotel = spec::hotels(&svc).await.remove(0);
        let barata = &hotel.rooms[2];

        let err = svc
            .execute(booking(hotel.id, barata.id, 3))
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::GuestsExceedCapacity { .. },
        ));

        let stored = spec::hotels(&svc).await.remove(0);
        assert!(stored.rooms[2].active);
        assert_eq!(reservations_count(&svc).await, 0);
    }
}
