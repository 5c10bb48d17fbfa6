//! In-memory database client definitions.

use std::{future::Future, mem, sync::Arc};

use tokio::sync::{Mutex, OwnedRwLockWriteGuard, RwLock};
use tracerr::Traced;

use crate::infra::database::{self, memory};

use super::{Memory, Tables};

/// Access to the [`Tables`] of a [`Memory`] database.
pub trait Connection {
    /// Runs the provided function over a shared view of the [`Tables`].
    fn read<F, R>(
        &self,
        f: F,
    ) -> impl Future<Output = Result<R, Traced<database::Error>>>
    where
        F: FnOnce(&Tables) -> R;

    /// Runs the provided function over an exclusive view of the [`Tables`].
    fn write<F, R>(
        &self,
        f: F,
    ) -> impl Future<Output = Result<R, Traced<database::Error>>>
    where
        F: FnOnce(&mut Tables) -> R;
}

impl<C: Connection> Connection for Memory<C> {
    async fn read<F, R>(&self, f: F) -> Result<R, Traced<database::Error>>
    where
        F: FnOnce(&Tables) -> R,
    {
        self.0.read(f).await.map_err(tracerr::wrap!())
    }

    async fn write<F, R>(&self, f: F) -> Result<R, Traced<database::Error>>
    where
        F: FnOnce(&mut Tables) -> R,
    {
        self.0.write(f).await.map_err(tracerr::wrap!())
    }
}

/// Non-transactional in-memory database client.
///
/// Every operation holds the lock only for its own duration.
#[derive(Clone, Debug)]
pub struct NonTx {
    /// Shared [`Tables`].
    tables: Arc<RwLock<Tables>>,
}

impl NonTx {
    /// Creates a new [`NonTx`] client over the provided [`Tables`].
    #[must_use]
    pub(crate) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self { tables }
    }
}

impl Connection for NonTx {
    async fn read<F, R>(&self, f: F) -> Result<R, Traced<database::Error>>
    where
        F: FnOnce(&Tables) -> R,
    {
        Ok(f(&*self.tables.read().await))
    }

    async fn write<F, R>(&self, f: F) -> Result<R, Traced<database::Error>>
    where
        F: FnOnce(&mut Tables) -> R,
    {
        Ok(f(&mut *self.tables.write().await))
    }
}

/// Transactional in-memory database client.
///
/// Holds the write lock of the [`Tables`] from creation until [`Tx::commit()`]
/// or drop, working on a staged copy of them. Dropping all the clones of an
/// uncommitted [`Tx`] discards the staged changes.
#[derive(Clone, Debug)]
pub struct Tx {
    /// Staged state, [`None`] once committed.
    inner: Arc<Mutex<Option<Staged>>>,
}

/// Staged state of a [`Tx`].
#[derive(Debug)]
struct Staged {
    /// Write lock of the published [`Tables`].
    guard: OwnedRwLockWriteGuard<Tables>,

    /// Copy of the [`Tables`] being modified.
    tables: Tables,
}

impl Tx {
    /// Starts a new [`Tx`] upon the [`Tables`] of the provided [`NonTx`]
    /// client, waiting for all other operations on them to finish.
    pub async fn from_non_tx(client: &NonTx) -> Self {
        let guard = Arc::clone(&client.tables).write_owned().await;
        let tables = Tables::clone(&guard);
        Self {
            inner: Arc::new(Mutex::new(Some(Staged { guard, tables }))),
        }
    }

    /// Publishes the staged changes of this [`Tx`] and releases the lock.
    ///
    /// # Errors
    ///
    /// With [`memory::Error::TransactionClosed`] if this [`Tx`] has been
    /// committed already.
    pub async fn commit(&self) -> Result<(), Traced<database::Error>> {
        let Staged { mut guard, tables } = self
            .inner
            .lock()
            .await
            .take()
            .ok_or(memory::Error::TransactionClosed)
            .map_err(tracerr::from_and_wrap!(=> database::Error))?;
        drop(mem::replace(&mut *guard, tables));
        Ok(())
    }
}

impl Connection for Tx {
    async fn read<F, R>(&self, f: F) -> Result<R, Traced<database::Error>>
    where
        F: FnOnce(&Tables) -> R,
    {
        let staged = self.inner.lock().await;
        staged
            .as_ref()
            .map(|s| f(&s.tables))
            .ok_or(memory::Error::TransactionClosed)
            .map_err(tracerr::from_and_wrap!(=> database::Error))
    }

    async fn write<F, R>(&self, f: F) -> Result<R, Traced<database::Error>>
    where
        F: FnOnce(&mut Tables) -> R,
    {
        let mut staged = self.inner.lock().await;
        staged
            .as_mut()
            .map(|s| f(&mut s.tables))
            .ok_or(memory::Error::TransactionClosed)
            .map_err(tracerr::from_and_wrap!(=> database::Error))
    }
}
