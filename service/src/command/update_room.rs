//! [`Command`] for updating a single [`Room`] of a [`Hotel`].

use common::{
    operations::{By, Commit, Select, Transact, Transacted, Update},
    Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        hotel::{self, room},
        Hotel, Reservation, Room,
    },
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for updating a single [`Room`] of a [`Hotel`].
///
/// A [`Room`] held by a [`Reservation`] cannot be made available.
#[derive(Clone, Debug)]
pub struct UpdateRoom {
    /// ID of the [`Hotel`] the [`Room`] belongs to.
    pub hotel_id: hotel::Id,

    /// ID of the [`Room`] to update.
    pub room_id: room::Id,

    /// Changes to merge into the [`Room`].
    pub patch: Patch,
}

/// Changes of a [`Room`], applied only where provided.
///
/// The price is never patched directly, it follows the merged costs.
#[derive(Clone, Copy, Debug, Default)]
pub struct Patch {
    /// New kind of the [`Room`].
    pub kind: Option<room::Kind>,

    /// New base cost of the [`Room`].
    pub base_cost: Option<Money>,

    /// New taxes of the [`Room`].
    pub taxes: Option<Money>,

    /// New capacity of the [`Room`].
    pub max_guests: Option<room::MaxGuests>,

    /// New availability of the [`Room`].
    pub active: Option<bool>,
}

impl Patch {
    /// Merges this [`Patch`] into the provided [`Room`] and reprices it.
    pub fn apply(self, room: &mut Room) {
        let Self {
            kind,
            base_cost,
            taxes,
            max_guests,
            active,
        } = self;

        if let Some(kind) = kind {
            room.kind = kind;
        }
        if let Some(base_cost) = base_cost {
            room.base_cost = base_cost;
        }
        if let Some(taxes) = taxes {
            room.taxes = taxes;
        }
        if let Some(max_guests) = max_guests {
            room.max_guests = max_guests;
        }
        if let Some(active) = active {
            room.active = active;
        }
        room.reprice();
    }
}

impl<Db> Command<UpdateRoom> for Service<Db>
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
    type Ok = Room;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateRoom) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateRoom {
            hotel_id,
            room_id,
            patch,
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

        let room = hotel
            .room_mut(room_id)
            .ok_or(E::RoomNotExists(room_id))
            .map_err(tracerr::wrap!())?;

        if patch.active == Some(true) && !room.active {
            let holders = tx
                .execute(Select(By::<Vec<Reservation>, _>::new(
                    read::reservation::list::Filter {
                        hotel_id: Some(hotel_id),
                        room_id: Some(room_id),
                        date: None,
                    },
                )))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if !holders.is_empty() {
                return Err(tracerr::new!(E::RoomBooked(room_id)));
            }
        }
        patch.apply(room);
        let room = room.clone();

        tx.execute(Update(hotel))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(room)
    }
}

/// Error of [`UpdateRoom`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Hotel`] with the provided ID does not exist.
    #[display("`Hotel(id: {_0})` does not exist")]
    HotelNotExists(#[error(not(source))] hotel::Id),

    /// [`Room`] with the provided ID does not exist in the [`Hotel`].
    #[display("`Room(id: {_0})` does not exist")]
    RoomNotExists(#[error(not(source))] room::Id),

    /// [`Room`] with the provided ID is held by a [`Reservation`].
    #[display("`Room(id: {_0})` is booked")]
    RoomBooked(#[error(not(source))] room::Id),
}
