//! [`Command`] definition.

pub mod authorize_user_session;
pub mod create_hotel;
pub mod create_reservation;
pub mod create_user_session;
pub mod delete_hotel;
pub mod delete_reservation;
pub mod update_hotel;
pub mod update_room;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    authorize_user_session::AuthorizeUserSession, create_hotel::CreateHotel,
    create_reservation::CreateReservation,
    create_user_session::CreateUserSession, delete_hotel::DeleteHotel,
    delete_reservation::DeleteReservation, update_hotel::UpdateHotel,
    update_room::UpdateRoom,
};
