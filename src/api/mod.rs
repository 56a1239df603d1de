//! API handlers for Biblion REST endpoints

pub mod audit;
pub mod auth;
pub mod authors;
pub mod books;
pub mod health;
pub mod openapi;
pub mod penalties;
pub mod publishers;
pub mod registry;
pub mod roles;
pub mod taxonomies;
pub mod translators;
pub mod users;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppError, models::user::SessionUser, AppState};

/// Extractor for the authenticated user behind a session token
pub struct AuthenticatedUser(pub SessionUser);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = session_token(parts)?;
        let session = state.services.sessions.authenticate(token).await?;
        Ok(AuthenticatedUser(session))
    }
}

/// Pull the opaque session token out of the Authorization header
pub(crate) fn session_token(parts: &Parts) -> Result<&str, AppError> {
    let auth_header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))
}

/// Response wrapper for collection list endpoints. `total` counts the rows
/// in the derived view, after search and status predicates apply.
#[derive(Serialize, ToSchema)]
pub struct CollectionResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// Rows passing the active predicates, in display order
    pub items: Vec<T>,
    /// Number of rows in the derived view
    pub total: i64,
}
