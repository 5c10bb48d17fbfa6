//! [`Command`] for deleting a [`Hotel`].

use common::operations::{By, Delete};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Reservation;
use crate::{
    domain::{hotel, Hotel},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Hotel`] along with its rooms.
///
/// [`Reservation`]s of the [`Hotel`] are kept.
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteHotel {
    /// ID of the [`Hotel`] to delete.
    pub id: hotel::Id,
}

impl<Db> Command<DeleteHotel> for Service<Db>
where
    Db: Database<
        Delete<By<Option<Hotel>, hotel::Id>>,
        Ok = Option<Hotel>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Hotel;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteHotel) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteHotel { id } = cmd;

        self.database()
            .execute(Delete(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::HotelNotExists(id))
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`DeleteHotel`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Hotel`] with the provided ID does not exist.
    #[display("`Hotel(id: {_0})` does not exist")]
    HotelNotExists(#[error(not(source))] hotel::Id),
}

#[cfg(test)]
mod spec {
    use crate::{command::Command as _, domain::hotel, spec};

    use super::{DeleteHotel, ExecutionError};

    #[tokio::test]
    async fn removes_hotel_from_list() {
        let svc = spec::service();
        let hotel = spec::hotels(&svc).await.remove(0);

        let deleted = svc.execute(DeleteHotel { id: hotel.id }).await.unwrap();
        assert_eq!(deleted.id, hotel.id);

        let left = spec::hotels(&svc).await;
        assert_eq!(left.len(), 1);
        assert!(left.iter().all(|h| h.id != hotel.id));
    }

    #[tokio::test]
    async fn fails_on_unknown_hotel() {
        let svc = spec::service();

        let err = svc
            .execute(DeleteHotel {
                id: hotel::Id::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::HotelNotExists(_)));
        assert_eq!(spec::hotels(&svc).await.len(), 2);
    }
}
