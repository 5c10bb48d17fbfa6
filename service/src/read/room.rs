//! [`Room`]-related read definitions.

use crate::domain::hotel;
#[cfg(doc)]
use crate::domain::{Hotel, Room};

/// [`Room`] which cannot be booked at the moment.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Disabled {
    /// ID of the [`Hotel`] the [`Room`] belongs to.
    pub hotel_id: hotel::Id,

    /// ID of the disabled [`Room`].
    pub room_id: hotel::room::Id,
}
