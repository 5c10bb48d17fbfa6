//! REST API definitions.

pub mod hotel;
pub mod reservation;
pub mod room;
pub mod route;
pub mod session;

use axum::{
    middleware,
    routing::{get, patch},
    Extension, Router,
};

use crate::{define_error, guard, Error, Service};

pub use self::{
    hotel::Hotel, reservation::Reservation, room::Room, session::User,
};

/// Builds the [`Router`] serving the REST API over the provided [`Service`].
///
/// Every matched route passes through the [`guard::enforce()`] middleware.
pub fn router(service: Service) -> Router {
    Router::new()
        .route("/api/hotels", get(hotel::list).post(hotel::create))
        .route(
            "/api/hotels/:id",
            get(hotel::get).patch(hotel::update).delete(hotel::delete),
        )
        .route("/api/hotels/:id/rooms", get(hotel::rooms))
        .route("/api/hotels/:id/rooms/:room_id", patch(room::update))
        .route("/api/rooms/disabled", get(room::disabled))
        .route(
            "/api/reservations",
            get(reservation::list).post(reservation::create),
        )
        .route(
            "/api/reservations/:id",
            get(reservation::get).delete(reservation::delete),
        )
        .route("/api/session", get(session::current).post(session::create))
        .route("/api/routes", get(route::list))
        .route("/api/routes/resolve", get(route::resolve))
        .route_layer(middleware::from_fn(guard::enforce))
        .fallback(not_found)
        .layer(Extension(service))
}

/// Responds to requests matching no route.
#[expect(clippy::unused_async, reason = "required by `Router::fallback()`")]
async fn not_found() -> Error {
    NotFoundError::Route.into()
}

define_error! {
    enum NotFoundError {
        #[code = "NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Route not found"]
        Route,
    }
}
