//! Sign-in form schema.

use secrecy::SecretBox;
use serde::Deserialize;
use validator::{Validate, ValidationError};

#[cfg(doc)]
use crate::domain::user::Session;
use crate::{command::CreateUserSession, domain::user};

use super::{error, Errors};

/// Unvalidated sign-in form input.
#[derive(Clone, Default, Deserialize, Validate, derive_more::Debug)]
pub struct Input {
    /// Email of the signing in [`user::User`].
    #[validate(
        required(message = "Email is required"),
        custom(function = "self::present")
    )]
    pub email: Option<String>,

    /// Password of the signing in [`user::User`].
    #[debug(skip)]
    #[validate(
        required(message = "Password is required"),
        length(min = 1, message = "Password is required")
    )]
    pub password: Option<String>,
}

/// Validates credentials for a new [`Session`].
///
/// Only presence is checked. A malformed email matches no [`user::User`], so
/// [`None`] is returned for it to fail as wrong credentials rather than as a
/// validation error.
///
/// # Errors
///
/// With every missing field.
pub fn create(input: Input) -> Result<Option<CreateUserSession>, Errors> {
    input.validate()?;

    let (Some(email), Some(password)) = (input.email, input.password) else {
        return Err(super::malformed());
    };
    let Some(email) = user::Email::new(email.trim()) else {
        return Ok(None);
    };
    Ok(Some(CreateUserSession::ByCredentials {
        email,
        password: SecretBox::new(Box::new(user::Password::from(
            password.as_str(),
        ))),
    }))
}

/// Requires the email `value` to be non-blank.
fn present(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(error("required", "Email is required"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod spec {
    use crate::{command::CreateUserSession, schema::failed};

    use super::{create, Input};

    #[test]
    fn requires_email_and_password() {
        let errors = failed(create(Input::default()));
        assert_eq!(errors["email"], "Email is required");
        assert_eq!(errors["password"], "Password is required");

        let errors = failed(create(Input {
            email: Some("  ".into()),
            password: Some("admin123".into()),
        }));
        assert_eq!(errors["email"], "Email is required");
        assert!(!errors.contains_key("password"));

        let errors = failed(create(Input {
            email: Some("admin@example.com".into()),
            password: Some(String::new()),
        }));
        assert_eq!(errors["password"], "Password is required");
    }

    #[test]
    fn passes_credentials_through() {
        let cmd = create(Input {
            email: Some(" admin@example.com ".into()),
            password: Some("admin123".into()),
        })
        .unwrap();

        assert!(matches!(
            cmd,
            Some(CreateUserSession::ByCredentials { email, .. })
                if email.to_string() == "admin@example.com",
        ));
    }

    #[test]
    fn malformed_email_matches_nobody() {
        let cmd = create(Input {
            email: Some("admin-at-example".into()),
            password: Some("admin123".into()),
        })
        .unwrap();

        assert!(cmd.is_none());
    }
}
