//! [`Query`] collection related to the multiple [`Hotel`]s.

use common::operations::By;

#[cfg(doc)]
use crate::Query;
use crate::{domain::Hotel, read};

use super::DatabaseQuery;

/// Queries a list of [`Hotel`]s in their creation order.
pub type List = DatabaseQuery<By<Vec<Hotel>, read::hotel::list::Filter>>;
