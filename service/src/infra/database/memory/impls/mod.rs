//! [`Database`] implementations.

mod hotel;
mod reservation;
mod user;

use common::operations::{Commit, Transact};
use tracerr::Traced;

use crate::infra::{database, Database};

use super::{Memory, NonTx, Tx};

impl Database<Transact> for Memory<NonTx> {
    type Ok = Memory<Tx>;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        Ok(Memory(Tx::from_non_tx(&self.0).await))
    }
}

impl Database<Transact> for Memory<Tx> {
    type Ok = Self;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        Ok(self.clone())
    }
}

impl Database<Commit> for Memory<Tx> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
        self.commit().await.map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Commit, Insert, Select, Transact};

    use crate::{
        domain::Hotel,
        infra::{database, memory, Database, Memory},
        read,
    };

    async fn hotels(db: &Memory) -> Vec<Hotel> {
        db.execute(Select(By::new(read::hotel::list::Filter::default())))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn commit_publishes_staged_changes() {
        let db = Memory::seeded().unwrap();
        let mut hotel = hotels(&db).await.remove(0);
        hotel.id = crate::domain::hotel::Id::new();

        let tx = db.execute(Transact).await.unwrap();
        tx.execute(Insert(hotel.clone())).await.unwrap();
        let staged: Vec<Hotel> = tx
            .execute(Select(By::new(read::hotel::list::Filter::default())))
            .await
            .unwrap();
        assert_eq!(staged.len(), 3);
        tx.execute(Commit).await.unwrap();

        assert_eq!(hotels(&db).await.len(), 3);
    }

    #[tokio::test]
    async fn dropped_transaction_discards_changes() {
        let db = Memory::seeded().unwrap();
        let mut hotel = hotels(&db).await.remove(0);
        hotel.id = crate::domain::hotel::Id::new();

        let tx = db.execute(Transact).await.unwrap();
        tx.execute(Insert(hotel)).await.unwrap();
        drop(tx);

        assert_eq!(hotels(&db).await.len(), 2);
    }

    #[tokio::test]
    async fn committed_transaction_is_closed() {
        let db = Memory::seeded().unwrap();

        let tx = db.execute(Transact).await.unwrap();
        tx.execute(Commit).await.unwrap();

        let err = tx.execute(Commit).await.unwrap_err();
        assert!(matches!(
            err.as_ref(),
            database::Error::Memory(memory::Error::TransactionClosed),
        ));
    }
}
