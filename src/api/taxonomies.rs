//! Taxonomy endpoints: categories, languages, and formats.
//!
//! The three lookup resources share one set of handlers parameterized on
//! [`Taxonomy`]; the thin per-path functions exist so each route carries its
//! own OpenAPI documentation.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    collection::{CollectionQuery, CollectionView},
    error::AppResult,
    models::{
        taxonomy::{CreateLookup, Lookup, LookupSortField, UpdateLookup},
        user::SessionUser,
    },
    repository::taxonomies::Taxonomy,
    AppState,
};

use super::{AuthenticatedUser, CollectionResponse};

async fn list(
    state: &AppState,
    taxonomy: Taxonomy,
    query: CollectionQuery<LookupSortField>,
) -> AppResult<Json<CollectionResponse<Lookup>>> {
    let rows = state.services.taxonomies.list(taxonomy).await?;

    let mut view = CollectionView::new();
    view.initialize(rows);
    query.apply(&mut view);

    let items = view.into_view();
    let total = items.len() as i64;
    Ok(Json(CollectionResponse { items, total }))
}

async fn get(state: &AppState, taxonomy: Taxonomy, id: i32) -> AppResult<Json<Lookup>> {
    Ok(Json(state.services.taxonomies.get(taxonomy, id).await?))
}

async fn create(
    state: &AppState,
    session: &SessionUser,
    taxonomy: Taxonomy,
    lookup: CreateLookup,
) -> AppResult<(StatusCode, Json<Lookup>)> {
    let created = state
        .services
        .taxonomies
        .create(session, taxonomy, lookup)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update(
    state: &AppState,
    session: &SessionUser,
    taxonomy: Taxonomy,
    id: i32,
    lookup: UpdateLookup,
) -> AppResult<Json<Lookup>> {
    let updated = state
        .services
        .taxonomies
        .update(session, taxonomy, id, lookup)
        .await?;
    Ok(Json(updated))
}

async fn delete(
    state: &AppState,
    session: &SessionUser,
    taxonomy: Taxonomy,
    id: i32,
) -> AppResult<StatusCode> {
    state
        .services
        .taxonomies
        .delete(session, taxonomy, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- Categories ----

/// List categories with search and sort predicates
#[utoipa::path(
    get,
    path = "/categories",
    tag = "taxonomies",
    security(("bearer_auth" = [])),
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive substring match on name and code"),
        ("sort_by" = Option<String>, Query, description = "Sort field: name, code, created_at"),
        ("sort_dir" = Option<String>, Query, description = "Sort direction: asc (default), desc")
    ),
    responses(
        (status = 200, description = "Category collection view", body = CollectionResponse<Lookup>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_categories(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Query(query): Query<CollectionQuery<LookupSortField>>,
) -> AppResult<Json<CollectionResponse<Lookup>>> {
    list(&state, Taxonomy::Categories, query).await
}

/// Get category by ID
#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "taxonomies",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category details", body = Lookup),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_category(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Lookup>> {
    get(&state, Taxonomy::Categories, id).await
}

/// Create a new category
#[utoipa::path(
    post,
    path = "/categories",
    tag = "taxonomies",
    security(("bearer_auth" = [])),
    request_body = CreateLookup,
    responses(
        (status = 201, description = "Category created", body = Lookup),
        (status = 409, description = "Category already exists")
    )
)]
pub async fn create_category(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Json(lookup): Json<CreateLookup>,
) -> AppResult<(StatusCode, Json<Lookup>)> {
    create(&state, &session, Taxonomy::Categories, lookup).await
}

/// Update a category
#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = "taxonomies",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    request_body = UpdateLookup,
    responses(
        (status = 200, description = "Category updated", body = Lookup),
        (status = 404, description = "Category not found")
    )
)]
pub async fn update_category(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(lookup): Json<UpdateLookup>,
) -> AppResult<Json<Lookup>> {
    update(&state, &session, Taxonomy::Categories, id, lookup).await
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "taxonomies",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category is referenced by books")
    )
)]
pub async fn delete_category(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    delete(&state, &session, Taxonomy::Categories, id).await
}

// ---- Languages ----

/// List languages with search and sort predicates
#[utoipa::path(
    get,
    path = "/languages",
    tag = "taxonomies",
    security(("bearer_auth" = [])),
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive substring match on name and ISO code"),
        ("sort_by" = Option<String>, Query, description = "Sort field: name, code, created_at"),
        ("sort_dir" = Option<String>, Query, description = "Sort direction: asc (default), desc")
    ),
    responses(
        (status = 200, description = "Language collection view", body = CollectionResponse<Lookup>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_languages(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Query(query): Query<CollectionQuery<LookupSortField>>,
) -> AppResult<Json<CollectionResponse<Lookup>>> {
    list(&state, Taxonomy::Languages, query).await
}

/// Get language by ID
#[utoipa::path(
    get,
    path = "/languages/{id}",
    tag = "taxonomies",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Language ID")),
    responses(
        (status = 200, description = "Language details", body = Lookup),
        (status = 404, description = "Language not found")
    )
)]
pub async fn get_language(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Lookup>> {
    get(&state, Taxonomy::Languages, id).await
}

/// Create a new language
#[utoipa::path(
    post,
    path = "/languages",
    tag = "taxonomies",
    security(("bearer_auth" = [])),
    request_body = CreateLookup,
    responses(
        (status = 201, description = "Language created", body = Lookup),
        (status = 409, description = "Language already exists")
    )
)]
pub async fn create_language(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Json(lookup): Json<CreateLookup>,
) -> AppResult<(StatusCode, Json<Lookup>)> {
    create(&state, &session, Taxonomy::Languages, lookup).await
}

/// Update a language
#[utoipa::path(
    put,
    path = "/languages/{id}",
    tag = "taxonomies",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Language ID")),
    request_body = UpdateLookup,
    responses(
        (status = 200, description = "Language updated", body = Lookup),
        (status = 404, description = "Language not found")
    )
)]
pub async fn update_language(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(lookup): Json<UpdateLookup>,
) -> AppResult<Json<Lookup>> {
    update(&state, &session, Taxonomy::Languages, id, lookup).await
}

/// Delete a language
#[utoipa::path(
    delete,
    path = "/languages/{id}",
    tag = "taxonomies",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Language ID")),
    responses(
        (status = 204, description = "Language deleted"),
        (status = 404, description = "Language not found"),
        (status = 409, description = "Language is referenced by books")
    )
)]
pub async fn delete_language(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    delete(&state, &session, Taxonomy::Languages, id).await
}

// ---- Formats ----

/// List formats with search and sort predicates
#[utoipa::path(
    get,
    path = "/formats",
    tag = "taxonomies",
    security(("bearer_auth" = [])),
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive substring match on name and code"),
        ("sort_by" = Option<String>, Query, description = "Sort field: name, code, created_at"),
        ("sort_dir" = Option<String>, Query, description = "Sort direction: asc (default), desc")
    ),
    responses(
        (status = 200, description = "Format collection view", body = CollectionResponse<Lookup>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_formats(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Query(query): Query<CollectionQuery<LookupSortField>>,
) -> AppResult<Json<CollectionResponse<Lookup>>> {
    list(&state, Taxonomy::Formats, query).await
}

/// Get format by ID
#[utoipa::path(
    get,
    path = "/formats/{id}",
    tag = "taxonomies",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Format ID")),
    responses(
        (status = 200, description = "Format details", body = Lookup),
        (status = 404, description = "Format not found")
    )
)]
pub async fn get_format(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Lookup>> {
    get(&state, Taxonomy::Formats, id).await
}

/// Create a new format
#[utoipa::path(
    post,
    path = "/formats",
    tag = "taxonomies",
    security(("bearer_auth" = [])),
    request_body = CreateLookup,
    responses(
        (status = 201, description = "Format created", body = Lookup),
        (status = 409, description = "Format already exists")
    )
)]
pub async fn create_format(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Json(lookup): Json<CreateLookup>,
) -> AppResult<(StatusCode, Json<Lookup>)> {
    create(&state, &session, Taxonomy::Formats, lookup).await
}

/// Update a format
#[utoipa::path(
    put,
    path = "/formats/{id}",
    tag = "taxonomies",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Format ID")),
    request_body = UpdateLookup,
    responses(
        (status = 200, description = "Format updated", body = Lookup),
        (status = 404, description = "Format not found")
    )
)]
pub async fn update_format(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(lookup): Json<UpdateLookup>,
) -> AppResult<Json<Lookup>> {
    update(&state, &session, Taxonomy::Formats, id, lookup).await
}

/// Delete a format
#[utoipa::path(
    delete,
    path = "/formats/{id}",
    tag = "taxonomies",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Format ID")),
    responses(
        (status = 204, description = "Format deleted"),
        (status = 404, description = "Format not found"),
        (status = 409, description = "Format is referenced by books")
    )
)]
pub async fn delete_format(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    delete(&state, &session, Taxonomy::Formats, id).await
}
