//! User management service. All operations here are admin-gated at the API
//! layer; this service enforces the business rules.

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        audit::{AuditAction, NewAuditEntry},
        user::{CreateUser, SessionUser, UpdateUser, User},
    },
    repository::Repository,
    services::{audit::AuditService, sessions},
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    audit: AuditService,
}

impl UsersService {
    pub fn new(repository: Repository, audit: AuditService) -> Self {
        Self { repository, audit }
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.repository.users.list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    pub async fn create(&self, actor: &SessionUser, user: CreateUser) -> AppResult<User> {
        user.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if self.repository.users.login_exists(&user.login, None).await? {
            return Err(AppError::Conflict(format!(
                "Login '{}' is already taken",
                user.login
            )));
        }
        if self.repository.users.email_exists(&user.email, None).await? {
            return Err(AppError::Conflict(format!(
                "Email '{}' is already in use",
                user.email
            )));
        }

        let password_hash = sessions::hash_password(&user.password)?;
        let created = self
            .repository
            .users
            .create(&user.login, &user.email, &user.name, &password_hash, user.role)
            .await?;

        self.audit
            .record(self.entry(actor, AuditAction::Create, created.id, &created.login))
            .await?;
        Ok(created)
    }

    pub async fn update(&self, actor: &SessionUser, id: i32, user: UpdateUser) -> AppResult<User> {
        user.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        // Confirm the user exists before the uniqueness checks
        self.repository.users.get_by_id(id).await?;

        if let Some(ref email) = user.email {
            if self.repository.users.email_exists(email, Some(id)).await? {
                return Err(AppError::Conflict(format!(
                    "Email '{}' is already in use",
                    email
                )));
            }
        }

        let password_hash = match user.password {
            Some(ref password) => Some(sessions::hash_password(password)?),
            None => None,
        };

        let updated = self
            .repository
            .users
            .update(
                id,
                user.email.as_deref(),
                user.name.as_deref(),
                password_hash.as_deref(),
                user.role,
                user.status,
            )
            .await?;

        self.audit
            .record(self.entry(actor, AuditAction::Update, id, &updated.login))
            .await?;
        Ok(updated)
    }

    /// Delete a user account. A user cannot delete their own account.
    pub async fn delete(&self, actor: &SessionUser, id: i32) -> AppResult<()> {
        if actor.user_id == id {
            return Err(AppError::BusinessRule(
                "Users cannot delete their own account".to_string(),
            ));
        }
        let user = self.repository.users.get_by_id(id).await?;
        self.repository.users.delete(id).await?;
        self.audit
            .record(self.entry(actor, AuditAction::Delete, id, &user.login))
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
            resource: "user".to_string(),
            resource_id: Some(resource_id),
            detail: Some(detail.to_string()),
        }
    }
}
