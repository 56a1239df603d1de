//! ISBN registry endpoints: lookup and import

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        book::Book,
        record::{BiblioRecord, ImportRequest},
    },
    AppState,
};

use super::AuthenticatedUser;

#[derive(Deserialize, ToSchema)]
pub struct LookupQuery {
    pub isbn: String,
}

/// Look up an ISBN in the external registry
#[utoipa::path(
    get,
    path = "/registry/lookup",
    tag = "registry",
    security(("bearer_auth" = [])),
    params(("isbn" = String, Query, description = "ISBN-10 or ISBN-13, hyphens allowed")),
    responses(
        (status = 200, description = "Bibliographic record", body = BiblioRecord),
        (status = 404, description = "No record for this ISBN"),
        (status = 502, description = "Registry failure"),
        (status = 504, description = "Registry timeout")
    )
)]
pub async fn lookup(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Query(query): Query<LookupQuery>,
) -> AppResult<Json<BiblioRecord>> {
    let record = state.services.registry.lookup(&query.isbn).await?;
    Ok(Json(record))
}

/// Import an ISBN from the registry into the catalog
#[utoipa::path(
    post,
    path = "/registry/import",
    tag = "registry",
    security(("bearer_auth" = [])),
    request_body = ImportRequest,
    responses(
        (status = 201, description = "Book imported", body = Book),
        (status = 404, description = "No record for this ISBN"),
        (status = 409, description = "ISBN already in the catalog"),
        (status = 502, description = "Registry failure"),
        (status = 504, description = "Registry timeout")
    )
)]
pub async fn import(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Json(request): Json<ImportRequest>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state.services.registry.import(&session, request).await?;
    Ok((StatusCode::CREATED, Json(book)))
}
