//! [`Reservation`]-related read definitions.

#[cfg(doc)]
use crate::domain::Reservation;

pub mod list {
    //! [`Reservation`] list definitions.

    use common::Date;

    use crate::domain::{hotel, Reservation};
    #[cfg(doc)]
    use crate::domain::{Hotel, Room};

    /// Filter of a [`Reservation`] list.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// ID of the [`Hotel`] to list [`Reservation`]s of.
        pub hotel_id: Option<hotel::Id>,

        /// ID of the [`Room`] held by listed [`Reservation`]s.
        pub room_id: Option<hotel::room::Id>,

        /// [`Date`] the stay of listed [`Reservation`]s must cover.
        pub date: Option<Date>,
    }

    impl Filter {
        /// Checks whether the provided [`Reservation`] passes this [`Filter`].
        #[must_use]
        pub fn matches(&self, reservation: &Reservation) -> bool {
            self.hotel_id.map_or(true, |id| reservation.hotel_id == id)
                && self.room_id.map_or(true, |id| reservation.room_id == id)
                && self.date.map_or(true, |date| reservation.covers(date))
        }
    }
}
