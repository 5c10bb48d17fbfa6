//! Demo data a [`Memory`] database starts with.
//!
//! Two hotels with three room tiers each, an admin and a client account:
//!
//! | Email                | Password    | Role     |
//! |----------------------|-------------|----------|
//! | `admin@example.com`  | `admin123`  | `admin`  |
//! | `client@example.com` | `client123` | `client` |

use std::sync::OnceLock;

use common::{DateTime, Money};

#[cfg(doc)]
use super::Memory;
use super::Tables;
use crate::domain::{
    hotel::{self, room},
    user::{self, Role},
    Hotel, Room, User,
};

/// Creates the seeded [`Tables`].
///
/// Users get the same IDs and password hashes across calls, while hotels and
/// rooms get fresh IDs every time.
///
/// # Errors
///
/// If failed to hash the passwords of the seeded users.
pub fn tables() -> Result<Tables, bcrypt::BcryptError> {
    static USERS: OnceLock<Vec<User>> = OnceLock::new();

    let users = if let Some(users) = USERS.get() {
        users.clone()
    } else {
        let users = users()?;
        USERS.get_or_init(|| users).clone()
    };

    Ok(Tables {
        hotels: hotels(),
        reservations: Vec::new(),
        users,
    })
}

/// Creates the seeded [`Hotel`]s.
#[expect(unsafe_code, reason = "literals below are valid")]
fn hotels() -> Vec<Hotel> {
    /// Creates a seeded [`Room`].
    fn tier(kind: room::Kind, base: u32, taxes: u32, max_guests: u16) -> Room {
        // SAFETY: Only positive literals are passed.
        #[expect(unsafe_code, reason = "literals below are valid")]
        let max_guests = unsafe { room::MaxGuests::new_unchecked(max_guests) };
        Room::new(
            kind,
            Money::from_units(base),
            Money::from_units(taxes),
            max_guests,
        )
    }

    [
        (
            "Hotel Paradise",
            "Cartagena, Colombia",
            [(250, 50), (170, 30), (90, 10)],
        ),
        (
            "Sunset Resort",
            "Cancún, México",
            [(300, 50), (180, 40), (110, 10)],
        ),
    ]
    .into_iter()
    .map(|(name, location, [suite, normal, barata])| Hotel {
        id: hotel::Id::new(),
        // SAFETY: Literals are trimmed and non-empty.
        name: unsafe { hotel::Name::new_unchecked(name) },
        // SAFETY: Literals are trimmed and non-empty.
        location: unsafe { hotel::Location::new_unchecked(location) },
        rooms: vec![
            tier(room::Kind::Suite, suite.0, suite.1, 10),
            tier(room::Kind::Normal, normal.0, normal.1, 5),
            tier(room::Kind::Barata, barata.0, barata.1, 2),
        ],
        active: true,
        created_at: DateTime::now().coerce(),
    })
    .collect()
}

/// Creates the seeded [`User`]s.
#[expect(unsafe_code, reason = "literals below are valid")]
fn users() -> Result<Vec<User>, bcrypt::BcryptError> {
    [
        ("Administrator", "admin@example.com", "admin123", Role::Admin),
        ("Client", "client@example.com", "client123", Role::Client),
    ]
    .into_iter()
    .map(|(name, email, password, role)| {
        Ok(User {
            id: user::Id::new(),
            // SAFETY: Literals are trimmed and non-empty.
            name: unsafe { user::Name::new_unchecked(name) },
            // SAFETY: Literals are well-formed addresses.
            email: unsafe { user::Email::new_unchecked(email) },
            role,
            password_hash: user::PasswordHash::new(&user::Password::from(
                password,
            ))?,
        })
    })
    .collect()
}

#[cfg(test)]
mod spec {
    use common::Money;

    use crate::domain::hotel::room;

    #[test]
    fn seeds_two_hotels_with_three_tiers() {
        let tables = super::tables().unwrap();

        assert_eq!(tables.hotels.len(), 2);
        for hotel in &tables.hotels {
            assert!(hotel.active);
            assert_eq!(
                hotel.rooms.iter().map(|r| r.kind).collect::<Vec<_>>(),
                [room::Kind::Suite, room::Kind::Normal, room::Kind::Barata],
            );
            for room in &hotel.rooms {
                assert!(room.active);
                assert_eq!(room.price, room.base_cost + room.taxes);
            }
        }

        let sunset = &tables.hotels[1];
        assert_eq!(sunset.name.to_string(), "Sunset Resort");
        assert_eq!(sunset.location.to_string(), "Cancún, México");
        assert_eq!(
            sunset.rooms.iter().map(|r| r.price).collect::<Vec<_>>(),
            [350, 220, 120].map(Money::from_units),
        );
        assert_eq!(
            sunset
                .rooms
                .iter()
                .map(|r| r.max_guests.get())
                .collect::<Vec<_>>(),
            [10, 5, 2],
        );
    }

    #[test]
    fn seeds_admin_and_client() {
        let tables = super::tables().unwrap();

        let users = tables
            .users
            .iter()
            .map(|u| (u.email.to_string(), u.role))
            .collect::<Vec<_>>();
        assert_eq!(
            users,
            [
                ("admin@example.com".to_owned(), super::Role::Admin),
                ("client@example.com".to_owned(), super::Role::Client),
            ],
        );
        assert!(tables.users[0]
            .password_hash
            .verify(&"admin123".into()));
    }

    #[test]
    fn hotel_ids_are_fresh_per_seed() {
        let a = super::tables().unwrap();
        let b = super::tables().unwrap();
        assert_ne!(a.hotels[0].id, b.hotels[0].id);
        assert_eq!(a.users[0].id, b.users[0].id);
    }
}
