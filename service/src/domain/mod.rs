//! Domain definitions.

pub mod hotel;
pub mod reservation;
pub mod user;

pub use self::{
    hotel::{Hotel, Room},
    reservation::Reservation,
    user::User,
};
