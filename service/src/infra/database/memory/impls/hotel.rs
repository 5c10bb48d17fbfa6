//! [`Hotel`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{hotel, Hotel},
    infra::{
        database::{self, memory::Connection, Memory},
        Database,
    },
    read,
};

impl<C> Database<Select<By<Vec<Hotel>, read::hotel::list::Filter>>>
    for Memory<C>
where
    C: Connection,
{
    type Ok = Vec<Hotel>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Hotel>, read::hotel::list::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();
        self.read(|t| {
            t.hotels
                .iter()
                .filter(|h| filter.matches(h))
                .cloned()
                .collect()
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Select<By<Option<Hotel>, hotel::Id>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Option<Hotel>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Hotel>, hotel::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|t| t.hotels.iter().find(|h| h.id == id).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Select<By<Vec<read::room::Disabled>, ()>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Vec<read::room::Disabled>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<read::room::Disabled>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.read(|t| {
            t.hotels
                .iter()
                .flat_map(|h| {
                    h.rooms.iter().filter(|r| !r.active).map(|r| {
                        read::room::Disabled {
                            hotel_id: h.id,
                            room_id: r.id,
                        }
                    })
                })
                .collect()
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Insert<Hotel>> for Memory<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(hotel): Insert<Hotel>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|t| t.hotels.push(hotel))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Hotel>> for Memory<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(hotel): Update<Hotel>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|t| {
            if let Some(stored) = t.hotels.iter_mut().find(|h| h.id == hotel.id)
            {
                *stored = hotel;
            }
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Delete<By<Option<Hotel>, hotel::Id>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Option<Hotel>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Option<Hotel>, hotel::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.write(|t| {
            let pos = t.hotels.iter().position(|h| h.id == id)?;
            Some(t.hotels.remove(pos))
        })
        .await
        .map_err(tracerr::wrap!())
    }
}
