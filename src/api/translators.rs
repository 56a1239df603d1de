//! Translator endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    collection::{CollectionQuery, CollectionView},
    error::AppResult,
    models::translator::{CreateTranslator, Translator, TranslatorSortField, UpdateTranslator},
    AppState,
};

use super::{AuthenticatedUser, CollectionResponse};

/// List translators with search and sort predicates
#[utoipa::path(
    get,
    path = "/translators",
    tag = "translators",
    security(("bearer_auth" = [])),
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive substring match on name and language"),
        ("sort_by" = Option<String>, Query, description = "Sort field: name, language, created_at"),
        ("sort_dir" = Option<String>, Query, description = "Sort direction: asc (default), desc")
    ),
    responses(
        (status = 200, description = "Translator collection view", body = CollectionResponse<Translator>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_translators(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Query(query): Query<CollectionQuery<TranslatorSortField>>,
) -> AppResult<Json<CollectionResponse<Translator>>> {
    let translators = state.services.contributors.list_translators().await?;

    let mut view = CollectionView::new();
    view.initialize(translators);
    query.apply(&mut view);

    let items = view.into_view();
    let total = items.len() as i64;
    Ok(Json(CollectionResponse { items, total }))
}

/// Get translator by ID
#[utoipa::path(
    get,
    path = "/translators/{id}",
    tag = "translators",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Translator ID")),
    responses(
        (status = 200, description = "Translator details", body = Translator),
        (status = 404, description = "Translator not found")
    )
)]
pub async fn get_translator(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Translator>> {
    let translator = state.services.contributors.get_translator(id).await?;
    Ok(Json(translator))
}

/// Create a new translator
#[utoipa::path(
    post,
    path = "/translators",
    tag = "translators",
    security(("bearer_auth" = [])),
    request_body = CreateTranslator,
    responses(
        (status = 201, description = "Translator created", body = Translator),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Referenced language not found")
    )
)]
pub async fn create_translator(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Json(translator): Json<CreateTranslator>,
) -> AppResult<(StatusCode, Json<Translator>)> {
    let created = state
        .services
        .contributors
        .create_translator(&session, translator)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a translator
#[utoipa::path(
    put,
    path = "/translators/{id}",
    tag = "translators",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Translator ID")),
    request_body = UpdateTranslator,
    responses(
        (status = 200, description = "Translator updated", body = Translator),
        (status = 404, description = "Translator not found")
    )
)]
pub async fn update_translator(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(translator): Json<UpdateTranslator>,
) -> AppResult<Json<Translator>> {
    let updated = state
        .services
        .contributors
        .update_translator(&session, id, translator)
        .await?;
    Ok(Json(updated))
}

/// Delete a translator
#[utoipa::path(
    delete,
    path = "/translators/{id}",
    tag = "translators",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Translator ID")),
    responses(
        (status = 204, description = "Translator deleted"),
        (status = 404, description = "Translator not found"),
        (status = 409, description = "Translator is referenced by books")
    )
)]
pub async fn delete_translator(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state
        .services
        .contributors
        .delete_translator(&session, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
