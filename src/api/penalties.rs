//! Penalty rule endpoints. Writes are admin-only.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    collection::{CollectionQuery, CollectionView},
    error::AppResult,
    models::penalty::{CreatePenaltyRule, PenaltyRule, PenaltySortField, UpdatePenaltyRule},
    AppState,
};

use super::{AuthenticatedUser, CollectionResponse};

/// List penalty rules with search, sort, and status predicates
#[utoipa::path(
    get,
    path = "/penalty-rules",
    tag = "penalties",
    security(("bearer_auth" = [])),
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive substring match on name"),
        ("sort_by" = Option<String>, Query, description = "Sort field: name, days_overdue, fine_per_day, created_at"),
        ("sort_dir" = Option<String>, Query, description = "Sort direction: asc (default), desc"),
        ("status" = Option<String>, Query, description = "Status filter: all (default), active, inactive")
    ),
    responses(
        (status = 200, description = "Penalty rule collection view", body = CollectionResponse<PenaltyRule>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_penalty_rules(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Query(query): Query<CollectionQuery<PenaltySortField>>,
) -> AppResult<Json<CollectionResponse<PenaltyRule>>> {
    let rules = state.services.penalties.list().await?;

    let mut view = CollectionView::new();
    view.initialize(rules);
    query.apply(&mut view);

    let items = view.into_view();
    let total = items.len() as i64;
    Ok(Json(CollectionResponse { items, total }))
}

/// Get penalty rule by ID
#[utoipa::path(
    get,
    path = "/penalty-rules/{id}",
    tag = "penalties",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Penalty rule ID")),
    responses(
        (status = 200, description = "Penalty rule details", body = PenaltyRule),
        (status = 404, description = "Penalty rule not found")
    )
)]
pub async fn get_penalty_rule(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<PenaltyRule>> {
    let rule = state.services.penalties.get(id).await?;
    Ok(Json(rule))
}

/// Create a new penalty rule (admin only)
#[utoipa::path(
    post,
    path = "/penalty-rules",
    tag = "penalties",
    security(("bearer_auth" = [])),
    request_body = CreatePenaltyRule,
    responses(
        (status = 201, description = "Penalty rule created", body = PenaltyRule),
        (status = 403, description = "Administrator role required"),
        (status = 409, description = "Penalty rule already exists")
    )
)]
pub async fn create_penalty_rule(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Json(rule): Json<CreatePenaltyRule>,
) -> AppResult<(StatusCode, Json<PenaltyRule>)> {
    session.require_admin()?;
    let created = state.services.penalties.create(&session, rule).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a penalty rule (admin only)
#[utoipa::path(
    put,
    path = "/penalty-rules/{id}",
    tag = "penalties",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Penalty rule ID")),
    request_body = UpdatePenaltyRule,
    responses(
        (status = 200, description = "Penalty rule updated", body = PenaltyRule),
        (status = 403, description = "Administrator role required"),
        (status = 404, description = "Penalty rule not found")
    )
)]
pub async fn update_penalty_rule(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(rule): Json<UpdatePenaltyRule>,
) -> AppResult<Json<PenaltyRule>> {
    session.require_admin()?;
    let updated = state.services.penalties.update(&session, id, rule).await?;
    Ok(Json(updated))
}

/// Delete a penalty rule (admin only)
#[utoipa::path(
    delete,
    path = "/penalty-rules/{id}",
    tag = "penalties",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Penalty rule ID")),
    responses(
        (status = 204, description = "Penalty rule deleted"),
        (status = 403, description = "Administrator role required"),
        (status = 404, description = "Penalty rule not found")
    )
)]
pub async fn delete_penalty_rule(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    session.require_admin()?;
    state.services.penalties.delete(&session, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
