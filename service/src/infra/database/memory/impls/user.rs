//! [`User`]-related [`Database`] implementations.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{user, User},
    infra::{
        database::{self, memory::Connection, Memory},
        Database,
    },
};

impl<C> Database<Select<By<Option<User>, user::Id>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|t| t.users.iter().find(|u| u.id == id).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Select<By<Option<User>, &user::Email>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, &user::Email>>,
    ) -> Result<Self::Ok, Self::Err> {
        let email: &str = by.into_inner().as_ref();
        self.read(|t| {
            t.users
                .iter()
                .find(|u| {
                    AsRef::<str>::as_ref(&u.email).eq_ignore_ascii_case(email)
                })
                .cloned()
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Select};

    use crate::{
        domain::{
            user::{self, Role},
            User,
        },
        infra::{Database, Memory},
    };

    #[tokio::test]
    async fn finds_seeded_users_by_email_and_id() {
        let db = Memory::seeded().unwrap();
        let email = user::Email::new("ADMIN@example.com").unwrap();

        let admin = db
            .execute(Select(By::<Option<User>, _>::new(&email)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.name.to_string(), "Administrator");

        let same = db
            .execute(Select(By::<Option<User>, _>::new(admin.id)))
            .await
            .unwrap();
        assert_eq!(same.map(|u| u.email), Some(admin.email));
    }

    #[tokio::test]
    async fn misses_unknown_users() {
        let db = Memory::seeded().unwrap();
        let email = user::Email::new("nobody@example.com").unwrap();

        let user = db
            .execute(Select(By::<Option<User>, _>::new(&email)))
            .await
            .unwrap();
        assert!(user.is_none());
    }
}
