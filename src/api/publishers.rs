//! Publisher endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    collection::{CollectionQuery, CollectionView},
    error::AppResult,
    models::publisher::{CreatePublisher, Publisher, PublisherSortField, UpdatePublisher},
    AppState,
};

use super::{AuthenticatedUser, CollectionResponse};

/// List publishers with search, sort, and status predicates
#[utoipa::path(
    get,
    path = "/publishers",
    tag = "publishers",
    security(("bearer_auth" = [])),
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive substring match on name and city"),
        ("sort_by" = Option<String>, Query, description = "Sort field: name, city, created_at"),
        ("sort_dir" = Option<String>, Query, description = "Sort direction: asc (default), desc"),
        ("status" = Option<String>, Query, description = "Status filter: all (default), active, inactive")
    ),
    responses(
        (status = 200, description = "Publisher collection view", body = CollectionResponse<Publisher>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_publishers(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Query(query): Query<CollectionQuery<PublisherSortField>>,
) -> AppResult<Json<CollectionResponse<Publisher>>> {
    let publishers = state.services.catalog.list_publishers().await?;

    let mut view = CollectionView::new();
    view.initialize(publishers);
    query.apply(&mut view);

    let items = view.into_view();
    let total = items.len() as i64;
    Ok(Json(CollectionResponse { items, total }))
}

/// Get publisher by ID
#[utoipa::path(
    get,
    path = "/publishers/{id}",
    tag = "publishers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Publisher ID")),
    responses(
        (status = 200, description = "Publisher details", body = Publisher),
        (status = 404, description = "Publisher not found")
    )
)]
pub async fn get_publisher(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Publisher>> {
    let publisher = state.services.catalog.get_publisher(id).await?;
    Ok(Json(publisher))
}

/// Create a new publisher
#[utoipa::path(
    post,
    path = "/publishers",
    tag = "publishers",
    security(("bearer_auth" = [])),
    request_body = CreatePublisher,
    responses(
        (status = 201, description = "Publisher created", body = Publisher),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Publisher already exists")
    )
)]
pub async fn create_publisher(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Json(publisher): Json<CreatePublisher>,
) -> AppResult<(StatusCode, Json<Publisher>)> {
    let created = state
        .services
        .catalog
        .create_publisher(&session, publisher)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a publisher
#[utoipa::path(
    put,
    path = "/publishers/{id}",
    tag = "publishers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Publisher ID")),
    request_body = UpdatePublisher,
    responses(
        (status = 200, description = "Publisher updated", body = Publisher),
        (status = 404, description = "Publisher not found")
    )
)]
pub async fn update_publisher(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(publisher): Json<UpdatePublisher>,
) -> AppResult<Json<Publisher>> {
    let updated = state
        .services
        .catalog
        .update_publisher(&session, id, publisher)
        .await?;
    Ok(Json(updated))
}

/// Delete a publisher
#[utoipa::path(
    delete,
    path = "/publishers/{id}",
    tag = "publishers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Publisher ID")),
    responses(
        (status = 204, description = "Publisher deleted"),
        (status = 404, description = "Publisher not found"),
        (status = 409, description = "Publisher is referenced by books")
    )
)]
pub async fn delete_publisher(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state
        .services
        .catalog
        .delete_publisher(&session, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
