//! [`Reservation`]-related REST API endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query,
    },
    Json,
};
use common::Date;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use service::{
    command::{self, create_reservation, delete_reservation},
    domain::{
        self, hotel,
        reservation::{self, DocumentKind, Gender},
    },
    query, read, schema, Command as _, Query as _,
};
use tracing as log;

#[cfg(doc)]
use crate::api::{Hotel, Room};
use crate::{define_error, AsError, Context, Error};

/// [`domain::Reservation`] as exposed by the API.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// ID of this [`Reservation`].
    pub id: reservation::Id,

    /// ID of the booked [`Hotel`].
    pub hotel_id: hotel::Id,

    /// ID of the booked [`Room`].
    pub room_id: hotel::room::Id,

    /// Full name of the guest.
    pub name: String,

    /// Birth date of the guest.
    pub birth_date: reservation::BirthDate,

    /// Gender of the guest.
    pub gender: Gender,

    /// Kind of the document presented by the guest.
    pub document_type: DocumentKind,

    /// Number of the document presented by the guest.
    pub document_number: String,

    /// Email of the guest.
    pub email: String,

    /// Phone of the guest.
    pub phone: String,

    /// Full name of the emergency contact.
    pub emergency_contact_name: String,

    /// Phone of the emergency contact.
    pub emergency_contact_phone: String,

    /// First day of the stay.
    pub check_in: reservation::CheckInDate,

    /// Last day of the stay.
    pub check_out: reservation::CheckOutDate,

    /// Number of guests staying.
    pub guests: u16,

    /// [`common::DateTime`] when this [`Reservation`] was created.
    pub created_at: reservation::CreationDateTime,
}

impl From<domain::Reservation> for Reservation {
    fn from(r: domain::Reservation) -> Self {
        let domain::Reservation {
            id,
            hotel_id,
            room_id,
            guest,
            check_in,
            check_out,
            guests,
            created_at,
        } = r;
        Self {
            id,
            hotel_id,
            room_id,
            name: guest.name.to_string(),
            birth_date: guest.birth_date,
            gender: guest.gender,
            document_type: guest.document_kind,
            document_number: guest.document_number.to_string(),
            email: guest.email.to_string(),
            phone: guest.phone.to_string(),
            emergency_contact_name: guest.emergency_contact_name.to_string(),
            emergency_contact_phone: guest.emergency_contact_phone.to_string(),
            check_in,
            check_out,
            guests: guests.get(),
            created_at,
        }
    }
}

/// Body wrapping a single [`Reservation`].
#[derive(Debug, Serialize)]
pub struct One {
    /// Wrapped [`Reservation`].
    pub reservation: Reservation,
}

/// Parameters of the [`list()`] endpoint.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// ID of the [`Hotel`] to list [`Reservation`]s of.
    pub hotel_id: Option<hotel::Id>,

    /// [`Date`] the stay of listed [`Reservation`]s must cover.
    pub date: Option<Date>,
}

/// Body of the [`list()`] endpoint.
#[derive(Debug, Serialize)]
pub struct List {
    /// Listed [`Reservation`]s in their creation order.
    pub reservations: Vec<Reservation>,
}

/// Lists [`Reservation`]s.
///
/// # Errors
///
/// If the query string is malformed.
#[tracing::instrument(skip_all, fields(api.name = "listReservations"))]
pub async fn list(
    ctx: Context,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<List>, Error> {
    let Query(ListParams { hotel_id, date }) =
        params.map_err(AsError::into_error)?;

    let reservations = ctx
        .service()
        .execute(query::reservations::List::by(
            read::reservation::list::Filter {
                hotel_id,
                room_id: None,
                date,
            },
        ))
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(List {
        reservations: reservations.into_iter().map(Into::into).collect(),
    }))
}

/// Books a [`Room`] of a [`Hotel`].
///
/// The form is validated against the [`Room`]s of the selected [`Hotel`]
/// that can be booked right now.
///
/// # Errors
///
/// Possible error codes:
/// - `VALIDATION_FAILED` - the provided form is invalid;
/// - `HOTEL_NOT_EXISTS` - no [`Hotel`] has the provided ID;
/// - `ROOM_NOT_EXISTS` - the [`Hotel`] has no [`Room`] with the provided ID;
/// - `HOTEL_INACTIVE` - the [`Hotel`] does not accept reservations;
/// - `ROOM_UNAVAILABLE` - the [`Room`] is already booked or disabled;
/// - `GUESTS_EXCEED_CAPACITY` - the [`Room`] is too small.
#[tracing::instrument(skip_all, fields(api.name = "createReservation"))]
pub async fn create(
    ctx: Context,
    body: Result<Json<schema::reservation::Input>, JsonRejection>,
) -> Result<(StatusCode, Json<One>), Error> {
    let Json(input) = body.map_err(AsError::into_error)?;

    let hotel_id = input
        .hotel_id
        .as_deref()
        .and_then(|id| id.trim().parse::<hotel::Id>().ok());
    let rooms = match hotel_id {
        Some(id) => ctx
            .service()
            .execute(query::hotel::ById::by(id))
            .await
            .map_err(AsError::into_error)?
            .map(|h| h.available_rooms().cloned().collect::<Vec<_>>())
            .unwrap_or_default(),
        None => Vec::new(),
    };
    let cmd = schema::reservation::create(input, &rooms)
        .map_err(AsError::into_error)?;

    let reservation = ctx
        .service()
        .execute(cmd)
        .await
        .map_err(AsError::into_error)?;
    log::info!("`Reservation(id: {})` created", reservation.id);

    Ok((
        StatusCode::CREATED,
        Json(One {
            reservation: reservation.into(),
        }),
    ))
}

/// Returns a single [`Reservation`].
///
/// # Errors
///
/// Possible error codes:
/// - `RESERVATION_NOT_FOUND` - no [`Reservation`] has the provided ID.
#[tracing::instrument(skip_all, fields(api.name = "getReservation"))]
pub async fn get(
    ctx: Context,
    id: Result<Path<reservation::Id>, PathRejection>,
) -> Result<Json<One>, Error> {
    let Path(id) = id.map_err(AsError::into_error)?;

    let reservation = ctx
        .service()
        .execute(query::reservation::ById::by(id))
        .await
        .map_err(AsError::into_error)?
        .ok_or(ReservationError::NotFound)?;

    Ok(Json(One {
        reservation: reservation.into(),
    }))
}

/// Deletes a [`Reservation`], making its [`Room`] available again.
///
/// # Errors
///
/// Possible error codes:
/// - `RESERVATION_NOT_FOUND` - no [`Reservation`] has the provided ID.
#[tracing::instrument(skip_all, fields(api.name = "deleteReservation"))]
pub async fn delete(
    ctx: Context,
    id: Result<Path<reservation::Id>, PathRejection>,
) -> Result<Json<One>, Error> {
    let Path(id) = id.map_err(AsError::into_error)?;

    let reservation = ctx
        .service()
        .execute(command::DeleteReservation { id })
        .await
        .map_err(AsError::into_error)?;
    log::info!("`Reservation(id: {id})` deleted");

    Ok(Json(One {
        reservation: reservation.into(),
    }))
}

define_error! {
    enum ReservationError {
        #[code = "RESERVATION_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Reservation not found"]
        NotFound,
    }
}

impl AsError for create_reservation::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "HOTEL_NOT_EXISTS"]
                #[status = BAD_REQUEST]
                #[message = "Selected hotel does not exist"]
                HotelNotExists,

                #[code = "ROOM_NOT_EXISTS"]
                #[status = BAD_REQUEST]
                #[message = "Selected room does not exist"]
                RoomNotExists,

                #[code = "HOTEL_INACTIVE"]
                #[status = CONFLICT]
                #[message = "Selected hotel does not accept reservations"]
                HotelInactive,

                #[code = "ROOM_UNAVAILABLE"]
                #[status = CONFLICT]
                #[message = "Selected room is not available"]
                RoomUnavailable,

                #[code = "GUESTS_EXCEED_CAPACITY"]
                #[status = BAD_REQUEST]
                #[message = "Number of guests exceeds the room limit"]
                GuestsExceedCapacity,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::HotelNotExists(_) => Some(Error::HotelNotExists.into()),
            Self::RoomNotExists(_) => Some(Error::RoomNotExists.into()),
            Self::HotelInactive(_) => Some(Error::HotelInactive.into()),
            Self::RoomUnavailable(_) => Some(Error::RoomUnavailable.into()),
            Self::GuestsExceedCapacity { .. } => {
                Some(Error::GuestsExceedCapacity.into())
            }
        }
    }
}

impl AsError for delete_reservation::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ReservationNotExists(_) => {
                Some(ReservationError::NotFound.into())
            }
        }
    }
}
