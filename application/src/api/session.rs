//! [`Session`]-related REST API endpoints.

use axum::{extract::rejection::JsonRejection, Json};
use http::StatusCode;
use serde::Serialize;
use service::{
    command::create_user_session,
    domain::{self, user},
    schema, Command as _,
};
use tracing as log;

use crate::{define_error, guard, AsError, Context, Error, Session};

/// [`domain::User`] as exposed by the API.
#[derive(Clone, Debug, Serialize)]
pub struct User {
    /// ID of this [`User`].
    pub id: user::Id,

    /// Name of this [`User`].
    pub name: String,

    /// Email of this [`User`].
    pub email: String,

    /// [`user::Role`] of this [`User`].
    pub role: user::Role,
}

impl From<domain::User> for User {
    fn from(user: domain::User) -> Self {
        Self {
            id: user.id,
            name: user.name.to_string(),
            email: user.email.to_string(),
            role: user.role,
        }
    }
}

/// Body of the [`create()`] endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Created {
    /// Bearer token to authorize further requests with.
    pub token: String,

    /// [`common::DateTime`] when the token expires.
    pub expires_at: user::session::ExpirationDateTime,

    /// Signed-in [`User`].
    pub user: User,

    /// Page the signed-in [`User`] should land on.
    pub redirect: &'static str,
}

/// Signs a [`User`] in by email and password.
///
/// # Errors
///
/// Possible error codes:
/// - `VALIDATION_FAILED` - email or password is missing;
/// - `WRONG_CREDENTIALS` - no [`User`] matches the credentials.
#[tracing::instrument(skip_all, fields(api.name = "createSession"))]
pub async fn create(
    ctx: Context,
    body: Result<Json<schema::session::Input>, JsonRejection>,
) -> Result<(StatusCode, Json<Created>), Error> {
    let Json(input) = body.map_err(AsError::into_error)?;
    let cmd = schema::session::create(input)
        .map_err(AsError::into_error)?
        .ok_or_else(|| Error::from(SessionError::WrongCredentials))?;

    let out = ctx
        .service()
        .execute(cmd)
        .await
        .map_err(AsError::into_error)?;
    log::debug!("`User(id: {})` signed in", out.user.id);

    Ok((
        StatusCode::CREATED,
        Json(Created {
            token: out.token.to_string(),
            expires_at: out.expires_at,
            redirect: guard::landing(out.user.role),
            user: out.user.into(),
        }),
    ))
}

/// Body of the [`current()`] endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Current {
    /// Signed-in [`User`].
    pub user: User,

    /// [`common::DateTime`] when the current [`Session`] expires.
    pub expires_at: user::session::ExpirationDateTime,
}

/// Returns the [`User`] of the current [`Session`].
///
/// # Errors
///
/// Possible error codes:
/// - `AUTHORIZATION_REQUIRED` - no valid token is provided.
#[tracing::instrument(skip_all, fields(api.name = "currentSession"))]
pub async fn current(ctx: Context) -> Result<Json<Current>, Error> {
    let Session {
        user, expires_at, ..
    } = ctx.current_session().await?;

    Ok(Json(Current {
        user: user.into(),
        expires_at,
    }))
}

define_error! {
    enum SessionError {
        #[code = "WRONG_CREDENTIALS"]
        #[status = UNAUTHORIZED]
        #[message = "Wrong email or password"]
        WrongCredentials,
    }
}

impl AsError for create_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::JsonWebTokenEncodeError(_) => None,
            Self::UserNotExists(_) | Self::WrongCredentials => {
                Some(SessionError::WrongCredentials.into())
            }
        }
    }
}
