//! Contributor role endpoints. Role management is admin-only.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    collection::{CollectionQuery, CollectionView},
    error::AppResult,
    models::role::{CreateRole, Role, RoleSortField, UpdateRole},
    AppState,
};

use super::{AuthenticatedUser, CollectionResponse};

/// List contributor roles with search and sort predicates
#[utoipa::path(
    get,
    path = "/roles",
    tag = "roles",
    security(("bearer_auth" = [])),
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive substring match on name and MARC code"),
        ("sort_by" = Option<String>, Query, description = "Sort field: name, marc_code, created_at"),
        ("sort_dir" = Option<String>, Query, description = "Sort direction: asc (default), desc")
    ),
    responses(
        (status = 200, description = "Role collection view", body = CollectionResponse<Role>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_roles(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Query(query): Query<CollectionQuery<RoleSortField>>,
) -> AppResult<Json<CollectionResponse<Role>>> {
    let roles = state.services.contributors.list_roles().await?;

    let mut view = CollectionView::new();
    view.initialize(roles);
    query.apply(&mut view);

    let items = view.into_view();
    let total = items.len() as i64;
    Ok(Json(CollectionResponse { items, total }))
}

/// Get role by ID
#[utoipa::path(
    get,
    path = "/roles/{id}",
    tag = "roles",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role details", body = Role),
        (status = 404, description = "Role not found")
    )
)]
pub async fn get_role(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Role>> {
    let role = state.services.contributors.get_role(id).await?;
    Ok(Json(role))
}

/// Create a new contributor role (admin only)
#[utoipa::path(
    post,
    path = "/roles",
    tag = "roles",
    security(("bearer_auth" = [])),
    request_body = CreateRole,
    responses(
        (status = 201, description = "Role created", body = Role),
        (status = 403, description = "Administrator role required")
    )
)]
pub async fn create_role(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Json(role): Json<CreateRole>,
) -> AppResult<(StatusCode, Json<Role>)> {
    session.require_admin()?;
    let created = state
        .services
        .contributors
        .create_role(&session, role)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a contributor role (admin only)
#[utoipa::path(
    put,
    path = "/roles/{id}",
    tag = "roles",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Role ID")),
    request_body = UpdateRole,
    responses(
        (status = 200, description = "Role updated", body = Role),
        (status = 403, description = "Administrator role required"),
        (status = 404, description = "Role not found")
    )
)]
pub async fn update_role(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(role): Json<UpdateRole>,
) -> AppResult<Json<Role>> {
    session.require_admin()?;
    let updated = state
        .services
        .contributors
        .update_role(&session, id, role)
        .await?;
    Ok(Json(updated))
}

/// Delete a contributor role (admin only)
#[utoipa::path(
    delete,
    path = "/roles/{id}",
    tag = "roles",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Role ID")),
    responses(
        (status = 204, description = "Role deleted"),
        (status = 403, description = "Administrator role required"),
        (status = 404, description = "Role not found")
    )
)]
pub async fn delete_role(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    session.require_admin()?;
    state.services.contributors.delete_role(&session, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
