//! UI routing endpoints backing the browser shell.

use axum::{
    extract::{rejection::QueryRejection, Query},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    guard::{self, Page, Resolution},
    AsError, Context, Error,
};

/// Body of the [`list()`] endpoint.
#[derive(Debug, Serialize)]
pub struct List {
    /// [`Page`]s the caller may visit.
    pub routes: Vec<Page>,
}

/// Lists the UI [`Page`]s visible to the caller.
///
/// # Errors
///
/// If the provided token is malformed.
#[tracing::instrument(skip_all, fields(api.name = "listRoutes"))]
pub async fn list(ctx: Context) -> Result<Json<List>, Error> {
    let session = ctx.try_current_session().await?;

    Ok(Json(List {
        routes: guard::visible(session.as_ref()).copied().collect(),
    }))
}

/// Parameters of the [`resolve()`] endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct ResolveParams {
    /// Path of the UI [`Page`] to resolve.
    pub path: String,
}

/// Resolves a UI [`Page`] for the caller, telling where to redirect if it
/// should not be shown.
///
/// # Errors
///
/// Possible error codes:
/// - `PAGE_NOT_FOUND` - no [`Page`] exists at the provided path.
#[tracing::instrument(skip_all, fields(api.name = "resolveRoute"))]
pub async fn resolve(
    ctx: Context,
    params: Result<Query<ResolveParams>, QueryRejection>,
) -> Result<Json<Resolution>, Error> {
    let Query(ResolveParams { path }) = params.map_err(AsError::into_error)?;
    let session = ctx.try_current_session().await?;

    guard::resolve(&path, session.as_ref()).map(Json)
}
