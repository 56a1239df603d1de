//! Audit trail service. Mutation paths call [`AuditService::record`] after
//! the database write succeeds; the log itself is append-only.

use crate::{
    error::AppResult,
    models::audit::{AuditEntry, NewAuditEntry},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuditService {
    repository: Repository,
}

impl AuditService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Append one entry to the audit log
    pub async fn record(&self, entry: NewAuditEntry) -> AppResult<()> {
        tracing::debug!(
            "Audit: {} {} {}{}",
            entry.actor_login,
            entry.action,
            entry.resource,
            entry
                .resource_id
                .map(|id| format!(" #{}", id))
                .unwrap_or_default()
        );
        self.repository.audit.append(&entry).await
    }

    /// Full audit collection for the list view
    pub async fn list(&self) -> AppResult<Vec<AuditEntry>> {
        self.repository.audit.list().await
    }

    /// Get one audit entry
    pub async fn get(&self, id: i64) -> AppResult<AuditEntry> {
        self.repository.audit.get_by_id(id).await
    }
}
