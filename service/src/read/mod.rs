//! Read entities definitions.

pub mod hotel;
pub mod reservation;
pub mod room;
