//! [`Command`] for deleting a [`Reservation`].

use common::operations::{
    By, Commit, Delete, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::Room;
use crate::{
    domain::{hotel, reservation, Hotel, Reservation},
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for deleting a [`Reservation`].
///
/// The booked [`Room`] becomes available again, if it still exists and no
/// other [`Reservation`] holds it.
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteReservation {
    /// ID of the [`Reservation`] to delete.
    pub id: reservation::Id,
}

impl<Db> Command<DeleteReservation> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Delete<By<Option<Reservation>, reservation::Id>>,
            Ok = Option<Reservation>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Reservation>, read::reservation::list::Filter>>,
            Ok = Vec<Reservation>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Hotel>, hotel::Id>>,
            Ok = Option<Hotel>,
            Err = Traced<database::Error>,
        > + Database<Update<Hotel>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Reservation;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteReservation,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteReservation { id } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let reservation = tx
            .execute(Delete(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ReservationNotExists(id))
            .map_err(tracerr::wrap!())?;

        let holders = tx
            .execute(Select(By::<Vec<Reservation>, _>::new(
                read::reservation::list::Filter {
                    hotel_id: Some(reservation.hotel_id),
                    room_id: Some(reservation.room_id),
                    date: None,
                },
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let hotel = tx
            .execute(Select(By::new(reservation.hotel_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        match hotel {
            _ if !holders.is_empty() => log::debug!(
                "`Room(id: {})` stays booked by {} other `Reservation`s",
                reservation.room_id,
                holders.len(),
            ),
            Some(mut hotel) if hotel.room(reservation.room_id).is_some() => {
                if let Some(room) = hotel.room_mut(reservation.room_id) {
                    room.active = true;
                }
                tx.execute(Update(hotel))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))
                    .map(drop)?;
            }
            _ => log::debug!(
                "`Room(id: {})` of `Reservation(id: {id})` no longer exists",
                reservation.room_id,
            ),
        }

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(reservation)
    }
}

/// Error of [`DeleteReservation`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Reservation`] with the provided ID does not exist.
    #[display("`Reservation(id: {_0})` does not exist")]
    ReservationNotExists(#[error(not(source))] reservation::Id),
}

#[cfg(test)]
mod spec {
    use common::operations::Insert;

    use crate::{
        command::{
            create_reservation::spec::booking, Command as _, DeleteHotel,
        },
        domain::{reservation, Reservation},
        infra::Database as _,
        query::{self, Query as _},
        spec,
    };

    use super::{DeleteReservation, ExecutionError};

    #[tokio::test]
    async fn reactivates_booked_room() {
        let svc = spec::service();
        let hotel = spec::hotels(&svc).await.remove(0);
        let room = &hotel.rooms[0];
        let reservation = svc
            .execute(booking(hotel.id, room.id, 2))
            .await
            .unwrap();

        let deleted = svc
            .execute(DeleteReservation { id: reservation.id })
            .await
            .unwrap();
        assert_eq!(deleted.id, reservation.id);

        assert!(svc
            .execute(query::rooms::Disabled::by(()))
            .await
            .unwrap()
            .is_empty());
        assert!(spec::hotels(&svc).await[0].rooms[0].active);
        assert!(svc
            .execute(query::reservation::ById::by(reservation.id))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn keeps_room_held_by_another_reservation() {
        let svc = spec::service();
        let hotel = spec::hotels(&svc).await.remove(0);
        let room = &hotel.rooms[0];
        let first = svc
            .execute(booking(hotel.id, room.id, 1))
            .await
            .unwrap();
        // Another booking slipped in while the room was held, e.g. seeded
        // or imported data.
        let second = Reservation {
            id: reservation::Id::new(),
            ..first.clone()
        };
        svc.database()
            .execute(Insert(second.clone()))
            .await
            .unwrap();

        _ = svc
            .execute(DeleteReservation { id: first.id })
            .await
            .unwrap();
        assert!(!spec::hotels(&svc).await[0].rooms[0].active);

        _ = svc
            .execute(DeleteReservation { id: second.id })
            .await
            .unwrap();
        assert!(spec::hotels(&svc).await[0].rooms[0].active);
    }

    #[tokio::test]
    async fn survives_deleted_hotel() {
        let svc = spec::service();
        let hotel = spec::hotels(&svc).await.remove(1);
        let reservation = svc
            .execute(booking(hotel.id, hotel.rooms[2].id, 1))
            .await
            .unwrap();
        _ = svc.execute(DeleteHotel { id: hotel.id }).await.unwrap();

        let deleted = svc
            .execute(DeleteReservation { id: reservation.id })
            .await
            .unwrap();
        assert_eq!(deleted.hotel_id, hotel.id);
        assert_eq!(spec::hotels(&svc).await.len(), 1);
    }

    #[tokio::test]
    async fn fails_on_unknown_reservation() {
        let svc = spec::service();

        let err = svc
            .execute(DeleteReservation {
                id: reservation::Id::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::ReservationNotExists(_),
        ));
    }
}
