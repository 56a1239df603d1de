//! Author endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    collection::{CollectionQuery, CollectionView},
    error::AppResult,
    models::author::{Author, AuthorSortField, CreateAuthor, UpdateAuthor},
    AppState,
};

use super::{AuthenticatedUser, CollectionResponse};

/// List authors with search, sort, and status predicates
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive substring match on name and email"),
        ("sort_by" = Option<String>, Query, description = "Sort field: name, email, created_at"),
        ("sort_dir" = Option<String>, Query, description = "Sort direction: asc (default), desc"),
        ("status" = Option<String>, Query, description = "Status filter: all (default), active, inactive")
    ),
    responses(
        (status = 200, description = "Author collection view", body = CollectionResponse<Author>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_authors(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Query(query): Query<CollectionQuery<AuthorSortField>>,
) -> AppResult<Json<CollectionResponse<Author>>> {
    let authors = state.services.contributors.list_authors().await?;

    let mut view = CollectionView::new();
    view.initialize(authors);
    query.apply(&mut view);

    let items = view.into_view();
    let total = items.len() as i64;
    Ok(Json(CollectionResponse { items, total }))
}

/// Get author by ID
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author details", body = Author),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Author>> {
    let author = state.services.contributors.get_author(id).await?;
    Ok(Json(author))
}

/// Create a new author
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    security(("bearer_auth" = [])),
    request_body = CreateAuthor,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Author already exists")
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Json(author): Json<CreateAuthor>,
) -> AppResult<(StatusCode, Json<Author>)> {
    let created = state
        .services
        .contributors
        .create_author(&session, author)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an author
#[utoipa::path(
    put,
    path = "/authors/{id}",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    request_body = UpdateAuthor,
    responses(
        (status = 200, description = "Author updated", body = Author),
        (status = 404, description = "Author not found")
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(author): Json<UpdateAuthor>,
) -> AppResult<Json<Author>> {
    let updated = state
        .services
        .contributors
        .update_author(&session, id, author)
        .await?;
    Ok(Json(updated))
}

/// Delete an author
#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 404, description = "Author not found"),
        (status = 409, description = "Author is referenced by books")
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state
        .services
        .contributors
        .delete_author(&session, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
