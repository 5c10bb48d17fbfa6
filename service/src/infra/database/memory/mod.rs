//! In-memory [`Database`] implementation.

pub mod client;
mod impls;
pub mod seed;

use std::sync::Arc;

use derive_more::{Deref, Display, Error as StdError};
use tokio::sync::RwLock;

#[cfg(doc)]
use crate::infra::Database;
use crate::domain::{Hotel, Reservation, User};

pub use self::client::{Connection, NonTx, Tx};

/// In-memory [`Database`] client.
///
/// Clones share the same [`Tables`].
#[derive(Clone, Debug, Deref)]
pub struct Memory<T = NonTx>(T);

impl Memory {
    /// Creates a new [`Memory`] client over empty [`Tables`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_tables(Tables::default())
    }

    /// Creates a new [`Memory`] client over the demo data described in the
    /// [`seed`] module.
    ///
    /// # Errors
    ///
    /// If failed to hash the passwords of the seeded users.
    pub fn seeded() -> Result<Self, bcrypt::BcryptError> {
        seed::tables().map(Self::with_tables)
    }

    /// Creates a new [`Memory`] client over the provided [`Tables`].
    #[must_use]
    pub fn with_tables(tables: Tables) -> Self {
        Self(NonTx::new(Arc::new(RwLock::new(tables))))
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

/// Stored data of a [`Memory`] database.
#[derive(Clone, Debug, Default)]
pub struct Tables {
    /// [`Hotel`]s in insertion order.
    pub hotels: Vec<Hotel>,

    /// [`Reservation`]s in insertion order.
    pub reservations: Vec<Reservation>,

    /// Registered [`User`]s.
    pub users: Vec<User>,
}

/// [`Memory`] database error.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// Operation upon an already committed [`Tx`].
    #[display("Transaction is already closed")]
    TransactionClosed,
}
