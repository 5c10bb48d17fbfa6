//! [`Query`] collection related to [`Room`]s across all [`Hotel`]s.

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::{
    domain::{Hotel, Room},
    Query,
};

use super::DatabaseQuery;

/// Queries every [`Room`] that cannot be booked right now.
///
/// Rooms of inactive [`Hotel`]s are listed only when disabled themselves.
pub type Disabled = DatabaseQuery<By<Vec<read::room::Disabled>, ()>>;
