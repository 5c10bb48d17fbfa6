//! [`Room`]-related REST API endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path,
    },
    Json,
};
use common::Money;
use serde::Serialize;
use service::{
    command::{self, update_room},
    domain::{self, hotel::room},
    query, schema, Command as _, Query as _,
};

#[cfg(doc)]
use crate::api::Hotel;
use crate::{api::hotel::HotelError, define_error, AsError, Context, Error};

/// [`domain::Room`] as exposed by the API.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// ID of this [`Room`].
    pub id: room::Id,

    /// Tier of this [`Room`].
    #[serde(rename = "type")]
    pub kind: room::Kind,

    /// Base cost of this [`Room`].
    pub base_cost: Money,

    /// Taxes of this [`Room`].
    pub taxes: Money,

    /// Total price of this [`Room`].
    pub price: Money,

    /// Number of guests this [`Room`] accommodates.
    pub max_guests: u16,

    /// Indicator whether this [`Room`] can be booked.
    pub active: bool,
}

impl From<domain::Room> for Room {
    fn from(room: domain::Room) -> Self {
        Self {
            id: room.id,
            kind: room.kind,
            base_cost: room.base_cost,
            taxes: room.taxes,
            price: room.price,
            max_guests: room.max_guests.get(),
            active: room.active,
        }
    }
}

/// Merges the provided fields into a [`Room`] of a [`Hotel`].
///
/// Any provided price is checked and then ignored, the stored one is
/// recomputed from the costs.
///
/// # Errors
///
/// Possible error codes:
/// - `VALIDATION_FAILED` - the provided form is invalid;
/// - `HOTEL_NOT_FOUND` - no [`Hotel`] has the provided ID;
/// - `ROOM_NOT_FOUND` - the [`Hotel`] has no [`Room`] with the provided ID;
/// - `ROOM_BOOKED` - a reserved [`Room`] is being made available.
#[tracing::instrument(skip_all, fields(api.name = "updateRoom"))]
pub async fn update(
    ctx: Context,
    ids: Result<Path<(domain::hotel::Id, room::Id)>, PathRejection>,
    body: Result<Json<schema::room::Input>, JsonRejection>,
) -> Result<Json<Room>, Error> {
    let Path((hotel_id, room_id)) = ids.map_err(AsError::into_error)?;
    let Json(input) = body.map_err(AsError::into_error)?;
    let patch = schema::room::patch(input).map_err(AsError::into_error)?;

    let room = ctx
        .service()
        .execute(command::UpdateRoom {
            hotel_id,
            room_id,
            patch,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(room.into()))
}

/// Body of the [`disabled()`] endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Disabled {
    /// IDs of the [`Room`]s that cannot be booked right now.
    pub room_ids: Vec<room::Id>,
}

/// Lists IDs of the [`Room`]s that cannot be booked right now.
///
/// # Errors
///
/// If the database fails.
#[tracing::instrument(skip_all, fields(api.name = "listDisabledRooms"))]
pub async fn disabled(ctx: Context) -> Result<Json<Disabled>, Error> {
    let rooms = ctx
        .service()
        .execute(query::rooms::Disabled::by(()))
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(Disabled {
        room_ids: rooms.into_iter().map(|r| r.room_id).collect(),
    }))
}

define_error! {
    enum RoomError {
        #[code = "ROOM_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Room not found"]
        NotFound,

        #[code = "ROOM_BOOKED"]
        #[status = CONFLICT]
        #[message = "Room is held by a reservation"]
        Booked,
    }
}

impl AsError for update_room::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::HotelNotExists(_) => Some(HotelError::NotFound.into()),
            Self::RoomNotExists(_) => Some(RoomError::NotFound.into()),
            Self::RoomBooked(_) => Some(RoomError::Booked.into()),
        }
    }
}
