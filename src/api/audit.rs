//! Audit log endpoints. Read-only; any authenticated user may inspect the
//! trail.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    collection::{CollectionQuery, CollectionView},
    error::AppResult,
    models::audit::{AuditEntry, AuditSortField},
    AppState,
};

use super::{AuthenticatedUser, CollectionResponse};

/// List audit entries with search and sort predicates
#[utoipa::path(
    get,
    path = "/audit",
    tag = "audit",
    security(("bearer_auth" = [])),
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive substring match on actor, action, resource, and detail"),
        ("sort_by" = Option<String>, Query, description = "Sort field: created_at, actor, resource"),
        ("sort_dir" = Option<String>, Query, description = "Sort direction: asc (default), desc")
    ),
    responses(
        (status = 200, description = "Audit collection view", body = CollectionResponse<AuditEntry>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_audit(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Query(query): Query<CollectionQuery<AuditSortField>>,
) -> AppResult<Json<CollectionResponse<AuditEntry>>> {
    let entries = state.services.audit.list().await?;

    let mut view = CollectionView::new();
    view.initialize(entries);
    query.apply(&mut view);

    let items = view.into_view();
    let total = items.len() as i64;
    Ok(Json(CollectionResponse { items, total }))
}

/// Get one audit entry
#[utoipa::path(
    get,
    path = "/audit/{id}",
    tag = "audit",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Audit entry ID")),
    responses(
        (status = 200, description = "Audit entry", body = AuditEntry),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Audit entry not found")
    )
)]
pub async fn get_audit_entry(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AuditEntry>> {
    let entry = state.services.audit.get(id).await?;
    Ok(Json(entry))
}
