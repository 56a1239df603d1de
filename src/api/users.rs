//! User management endpoints. All admin-only.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    collection::{CollectionQuery, CollectionView},
    error::AppResult,
    models::user::{CreateUser, UpdateUser, User, UserSortField},
    AppState,
};

use super::{AuthenticatedUser, CollectionResponse};

/// List users with search, sort, and status predicates (admin only)
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive substring match on login, name, and email"),
        ("sort_by" = Option<String>, Query, description = "Sort field: login, name, email, created_at"),
        ("sort_dir" = Option<String>, Query, description = "Sort direction: asc (default), desc"),
        ("status" = Option<String>, Query, description = "Status filter: all (default), active, inactive")
    ),
    responses(
        (status = 200, description = "User collection view", body = CollectionResponse<User>),
        (status = 403, description = "Administrator role required")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Query(query): Query<CollectionQuery<UserSortField>>,
) -> AppResult<Json<CollectionResponse<User>>> {
    session.require_admin()?;
    let users = state.services.users.list().await?;

    let mut view = CollectionView::new();
    view.initialize(users);
    query.apply(&mut view);

    let items = view.into_view();
    let total = items.len() as i64;
    Ok(Json(CollectionResponse { items, total }))
}

/// Get user by ID (admin only)
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 403, description = "Administrator role required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<User>> {
    session.require_admin()?;
    let user = state.services.users.get(id).await?;
    Ok(Json(user))
}

/// Create a new user (admin only)
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 403, description = "Administrator role required"),
        (status = 409, description = "Login or email already taken")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Json(user): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    session.require_admin()?;
    let created = state.services.users.create(&session, user).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a user (admin only)
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 403, description = "Administrator role required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(user): Json<UpdateUser>,
) -> AppResult<Json<User>> {
    session.require_admin()?;
    let updated = state.services.users.update(&session, id, user).await?;
    Ok(Json(updated))
}

/// Delete a user (admin only, never yourself)
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 403, description = "Administrator role required"),
        (status = 404, description = "User not found"),
        (status = 422, description = "Users cannot delete their own account")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    session.require_admin()?;
    state.services.users.delete(&session, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
