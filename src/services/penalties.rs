//! Penalty rule service. Rules are admin-gated at the API layer.

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        audit::{AuditAction, NewAuditEntry},
        penalty::{CreatePenaltyRule, PenaltyRule, UpdatePenaltyRule},
        user::SessionUser,
    },
    repository::Repository,
    services::audit::AuditService,
};

#[derive(Clone)]
pub struct PenaltiesService {
    repository: Repository,
    audit: AuditService,
}

impl PenaltiesService {
    pub fn new(repository: Repository, audit: AuditService) -> Self {
        Self { repository, audit }
    }

    pub async fn list(&self) -> AppResult<Vec<PenaltyRule>> {
        self.repository.penalties.list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<PenaltyRule> {
        self.repository.penalties.get_by_id(id).await
    }

    pub async fn create(&self, actor: &SessionUser, rule: CreatePenaltyRule) -> AppResult<PenaltyRule> {
        rule.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if self.repository.penalties.name_exists(&rule.name, None).await? {
            return Err(AppError::Conflict(format!(
                "Penalty rule '{}' already exists",
                rule.name
            )));
        }

        let created = self.repository.penalties.create(&rule).await?;
        self.audit
            .record(self.entry(actor, AuditAction::Create, created.id, &created.name))
            .await?;
        Ok(created)
    }

    pub async fn update(
        &self,
        actor: &SessionUser,
        id: i32,
        rule: UpdatePenaltyRule,
    ) -> AppResult<PenaltyRule> {
        rule.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if let Some(ref name) = rule.name {
            if self.repository.penalties.name_exists(name, Some(id)).await? {
                return Err(AppError::Conflict(format!(
                    "Penalty rule '{}' already exists",
                    name
                )));
            }
        }

        let updated = self.repository.penalties.update(id, &rule).await?;
        self.audit
            .record(self.entry(actor, AuditAction::Update, id, &updated.name))
            .await?;
        Ok(updated)
    }

    pub async fn delete(&self, actor: &SessionUser, id: i32) -> AppResult<()> {
        let rule = self.repository.penalties.get_by_id(id).await?;
        self.repository.penalties.delete(id).await?;
        self.audit
            .record(self.entry(actor, AuditAction::Delete, id, &rule.name))
            .await?;
        Ok(())
    }

    fn entry(
        &self,
        actor: &SessionUser,
        action: AuditAction,
        resource_id: i32,
        detail: &str,
    ) -> NewAuditEntry {
        NewAuditEntry {
            actor_id: Some(actor.user_id),
            actor_login: actor.login.clone(),
            action,
            resource: "penalty_rule".to_string(),
            resource_id: Some(resource_id),
            detail: Some(detail.to_string()),
        }
    }
}
