//! [`Query`] collection related to the multiple [`Reservation`]s.

use common::operations::By;

#[cfg(doc)]
use crate::Query;
use crate::{domain::Reservation, read};

use super::DatabaseQuery;

/// Queries a list of [`Reservation`]s matching a filter.
pub type List =
    DatabaseQuery<By<Vec<Reservation>, read::reservation::list::Filter>>;
