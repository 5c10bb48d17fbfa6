//! [`Hotel`]-related REST API endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query,
    },
    Json,
};
use common::Money;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use service::{
    command,
    domain::{self, hotel},
    query, read, schema, Command as _, Query as _,
};
use tracing as log;

use crate::{
    api::{room::RoomError, Room},
    define_error, AsError, Context, Error,
};

/// [`domain::Hotel`] as exposed by the API.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    /// ID of this [`Hotel`].
    pub id: hotel::Id,

    /// Name of this [`Hotel`].
    pub name: String,

    /// Location of this [`Hotel`].
    pub location: String,

    /// [`Room`]s of this [`Hotel`].
    pub rooms: Vec<Room>,

    /// Indicator whether this [`Hotel`] accepts reservations.
    pub active: bool,

    /// Lowest price among the [`Room`]s of this [`Hotel`].
    pub starting_price: Option<Money>,

    /// [`common::DateTime`] when this [`Hotel`] was created.
    pub created_at: hotel::CreationDateTime,
}

impl From<domain::Hotel> for Hotel {
    fn from(hotel: domain::Hotel) -> Self {
        Self {
            id: hotel.id,
            starting_price: hotel.starting_price(),
            name: hotel.name.to_string(),
            location: hotel.location.to_string(),
            rooms: hotel.rooms.into_iter().map(Into::into).collect(),
            active: hotel.active,
            created_at: hotel.created_at,
        }
    }
}

/// Body wrapping a single [`Hotel`].
#[derive(Debug, Serialize)]
pub struct One {
    /// Wrapped [`Hotel`].
    pub hotel: Hotel,
}

/// Parameters of the [`list()`] endpoint.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct ListParams {
    /// Whether to list only active (or only inactive) [`Hotel`]s.
    pub active: Option<bool>,
}

/// Body of the [`list()`] endpoint.
#[derive(Debug, Serialize)]
pub struct List {
    /// Listed [`Hotel`]s in their creation order.
    pub hotels: Vec<Hotel>,
}

/// Lists [`Hotel`]s.
///
/// # Errors
///
/// If the query string is malformed.
#[tracing::instrument(skip_all, fields(api.name = "listHotels"))]
pub async fn list(
    ctx: Context,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<List>, Error> {
    let Query(ListParams { active }) = params.map_err(AsError::into_error)?;

    let hotels = ctx
        .service()
        .execute(query::hotels::List::by(read::hotel::list::Filter {
            active,
        }))
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(List {
        hotels: hotels.into_iter().map(Into::into).collect(),
    }))
}

/// Creates a new [`Hotel`].
///
/// # Errors
///
/// Possible error codes:
/// - `VALIDATION_FAILED` - the provided form is invalid.
#[tracing::instrument(skip_all, fields(api.name = "createHotel"))]
pub async fn create(
    ctx: Context,
    body: Result<Json<schema::hotel::Input>, JsonRejection>,
) -> Result<(StatusCode, Json<One>), Error> {
    let Json(input) = body.map_err(AsError::into_error)?;
    let cmd = schema::hotel::create(input).map_err(AsError::into_error)?;

    let hotel = ctx
        .service()
        .execute(cmd)
        .await
        .map_err(AsError::into_error)?;
    log::info!("`Hotel(id: {})` created", hotel.id);

    Ok((StatusCode::CREATED, Json(One { hotel: hotel.into() })))
}

/// Returns a single [`Hotel`].
///
/// # Errors
///
/// Possible error codes:
/// - `HOTEL_NOT_FOUND` - no [`Hotel`] has the provided ID.
#[tracing::instrument(skip_all, fields(api.name = "getHotel"))]
pub async fn get(
    ctx: Context,
    id: Result<Path<hotel::Id>, PathRejection>,
) -> Result<Json<One>, Error> {
    let Path(id) = id.map_err(AsError::into_error)?;

    Ok(Json(One {
        hotel: find(&ctx, id).await?.into(),
    }))
}

/// Updates the provided fields of a [`Hotel`].
///
/// # Errors
///
/// Possible error codes:
/// - `VALIDATION_FAILED` - the provided form is invalid;
/// - `HOTEL_NOT_FOUND` - no [`Hotel`] has the provided ID;
/// - `ROOM_BOOKED` - a reserved [`Room`] is being made available.
#[tracing::instrument(skip_all, fields(api.name = "updateHotel"))]
pub async fn update(
    ctx: Context,
    id: Result<Path<hotel::Id>, PathRejection>,
    body: Result<Json<schema::hotel::Input>, JsonRejection>,
) -> Result<Json<One>, Error> {
    let Path(id) = id.map_err(AsError::into_error)?;
    let Json(input) = body.map_err(AsError::into_error)?;
    let cmd = schema::hotel::update(id, input).map_err(AsError::into_error)?;

    let hotel = ctx
        .service()
        .execute(cmd)
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(One {
        hotel: hotel.into(),
    }))
}

/// Body of the [`delete()`] endpoint.
#[derive(Debug, Serialize)]
pub struct Deleted {
    /// Confirmation message.
    pub message: String,
}

/// Deletes a [`Hotel`].
///
/// # Errors
///
/// Possible error codes:
/// - `HOTEL_NOT_FOUND` - no [`Hotel`] has the provided ID.
#[tracing::instrument(skip_all, fields(api.name = "deleteHotel"))]
pub async fn delete(
    ctx: Context,
    id: Result<Path<hotel::Id>, PathRejection>,
) -> Result<Json<Deleted>, Error> {
    let Path(id) = id.map_err(AsError::into_error)?;

    let hotel = ctx
        .service()
        .execute(command::DeleteHotel { id })
        .await
        .map_err(AsError::into_error)?;
    log::info!("`Hotel(id: {id})` deleted");

    Ok(Json(Deleted {
        message: format!("Hotel \"{}\" deleted", hotel.name),
    }))
}

/// Parameters of the [`rooms()`] endpoint.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct RoomsParams {
    /// Whether to list only the [`Room`]s that can be booked right now.
    #[serde(default)]
    pub available: bool,
}

/// Body of the [`rooms()`] endpoint.
#[derive(Debug, Serialize)]
pub struct Rooms {
    /// Listed [`Room`]s in their display order.
    pub rooms: Vec<Room>,
}

/// Lists [`Room`]s of a [`Hotel`].
///
/// # Errors
///
/// Possible error codes:
/// - `HOTEL_NOT_FOUND` - no [`Hotel`] has the provided ID.
#[tracing::instrument(skip_all, fields(api.name = "listHotelRooms"))]
pub async fn rooms(
    ctx: Context,
    id: Result<Path<hotel::Id>, PathRejection>,
    params: Result<Query<RoomsParams>, QueryRejection>,
) -> Result<Json<Rooms>, Error> {
    let Path(id) = id.map_err(AsError::into_error)?;
    let Query(RoomsParams { available }) =
        params.map_err(AsError::into_error)?;

    let hotel = find(&ctx, id).await?;
    let rooms = if available {
        hotel.available_rooms().cloned().map(Into::into).collect()
    } else {
        hotel.rooms.into_iter().map(Into::into).collect()
    };

    Ok(Json(Rooms { rooms }))
}

/// Loads the [`domain::Hotel`] with the provided ID.
///
/// # Errors
///
/// If no [`domain::Hotel`] has the provided ID.
pub(crate) async fn find(
    ctx: &Context,
    id: hotel::Id,
) -> Result<domain::Hotel, Error> {
    ctx.service()
        .execute(query::hotel::ById::by(id))
        .await
        .map_err(AsError::into_error)?
        .ok_or_else(|| HotelError::NotFound.into())
}

define_error! {
    enum HotelError {
        #[code = "HOTEL_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Hotel not found"]
        NotFound,

        #[code = "NO_ROOMS"]
        #[status = BAD_REQUEST]
        #[message = "At least one room is required"]
        NoRooms,
    }
}

impl AsError for command::create_hotel::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NoRooms => Some(HotelError::NoRooms.into()),
        }
    }
}

impl AsError for command::update_hotel::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::HotelNotExists(_) => Some(HotelError::NotFound.into()),
            Self::NoRooms => Some(HotelError::NoRooms.into()),
            Self::RoomBooked(_) => Some(RoomError::Booked.into()),
        }
    }
}

impl AsError for command::delete_hotel::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::HotelNotExists(_) => Some(HotelError::NotFound.into()),
        }
    }
}
