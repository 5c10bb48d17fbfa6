//! [`Hotel`]-related read definitions.

#[cfg(doc)]
use crate::domain::Hotel;

pub mod list {
    //! [`Hotel`] list definitions.

    use crate::domain::Hotel;

    /// Filter of a [`Hotel`] list.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// Whether to list only active (or only inactive) [`Hotel`]s.
        pub active: Option<bool>,
    }

    impl Filter {
        /// Checks whether the provided [`Hotel`] passes this [`Filter`].
        #[must_use]
        pub fn matches(&self, hotel: &Hotel) -> bool {
            self.active.map_or(true, |active| hotel.active == active)
        }
    }
}
