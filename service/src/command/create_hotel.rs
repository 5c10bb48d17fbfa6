//! [`Command`] for creating a new [`Hotel`].

use common::{
    operations::{Commit, Insert, Transact, Transacted},
    DateTime, Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        hotel::{self, room},
        Hotel, Room,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Hotel`].
#[derive(Clone, Debug)]
pub struct CreateHotel {
    /// Name of a new [`Hotel`].
    pub name: hotel::Name,

    /// Location of a new [`Hotel`].
    pub location: hotel::Location,

    /// [`Room`]s of a new [`Hotel`].
    pub rooms: Vec<RoomDraft>,
}

/// Validated description of a [`Room`] to be stored.
#[derive(Clone, Debug)]
pub struct RoomDraft {
    /// ID of an existing [`Room`] being replaced, if any.
    pub id: Option<room::Id>,

    /// Kind of the [`Room`].
    pub kind: room::Kind,

    /// Base cost of the [`Room`].
    pub base_cost: Money,

    /// Taxes of the [`Room`].
    pub taxes: Money,

    /// Capacity of the [`Room`], if specified.
    pub max_guests: Option<room::MaxGuests>,

    /// Availability of the [`Room`], if specified.
    pub active: Option<bool>,
}

impl RoomDraft {
    /// Builds a new [`Room`] out of this [`RoomDraft`].
    ///
    /// Unspecified capacity defaults to [`room::MaxGuests::DEFAULT`] and the
    /// price is always computed from the costs.
    #[must_use]
    pub fn into_room(self) -> Room {
        let mut room = Room::new(
            self.kind,
            self.base_cost,
            self.taxes,
            self.max_guests.unwrap_or_default(),
        );
        if let Some(id) = self.id {
            room.id = id;
        }
        if let Some(active) = self.active {
            room.active = active;
        }
        room
    }
}

impl<Db> Command<CreateHotel> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Hotel>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Hotel;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateHotel) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateHotel {
            name,
            location,
            rooms,
        } = cmd;

        if rooms.is_empty() {
            return Err(tracerr::new!(E::NoRooms));
        }

        let hotel = Hotel {
            id: hotel::Id::new(),
            name,
            location,
            // Identifiers and availability of new rooms are always assigned
            // here.
            rooms: rooms
                .into_iter()
                .map(|r| {
                    RoomDraft {
                        id: None,
                        active: None,
                        ..r
                    }
                    .into_room()
                })
                .collect(),
            active: true,
            created_at: DateTime::now().coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Insert(hotel.clone()))
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

/// Error of [`CreateHotel`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Hotel`] has no [`Room`]s.
    #[display("`Hotel` must have at least one `Room`")]
    NoRooms,
}
