//! Contributor services: authors, translators, and contributor roles.
//!
//! Each resource is written to its own table only; updating a role never
//! touches translators and vice versa.

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        audit::{AuditAction, NewAuditEntry},
        author::{Author, CreateAuthor, UpdateAuthor},
        role::{CreateRole, Role, UpdateRole},
        translator::{CreateTranslator, Translator, UpdateTranslator},
        user::SessionUser,
    },
    repository::Repository,
    services::audit::AuditService,
};

#[derive(Clone)]
pub struct ContributorsService {
    repository: Repository,
    audit: AuditService,
}

impl ContributorsService {
    pub fn new(repository: Repository, audit: AuditService) -> Self {
        Self { repository, audit }
    }

    // ---- Authors ----

    pub async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    pub async fn get_author(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    pub async fn create_author(&self, actor: &SessionUser, author: CreateAuthor) -> AppResult<Author> {
        author
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if let Some(existing) = self.repository.authors.find_by_name(&author.name).await? {
            return Err(AppError::Conflict(format!(
                "Author '{}' already exists (id={})",
                author.name, existing.id
            )));
        }

        let slug = self.unique_author_slug(&author.name).await?;
        let created = self
            .repository
            .authors
            .create(&author.name, &slug, author.email.as_deref(), author.bio.as_deref())
            .await?;

        self.audit
            .record(self.entry(actor, AuditAction::Create, "author", created.id, &created.name))
            .await?;
        Ok(created)
    }

    pub async fn update_author(
        &self,
        actor: &SessionUser,
        id: i32,
        author: UpdateAuthor,
    ) -> AppResult<Author> {
        author
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let existing = self.repository.authors.get_by_id(id).await?;
        let slug = match author.name {
            Some(ref name) if *name != existing.name => {
                Some(self.unique_author_slug(name).await?)
            }
            _ => None,
        };

        let updated = self
            .repository
            .authors
            .update(
                id,
                author.name.as_deref(),
                slug.as_deref(),
                author.email.as_deref(),
                author.bio.as_deref(),
            )
            .await?;

        self.audit
            .record(self.entry(actor, AuditAction::Update, "author", id, &updated.name))
            .await?;
        Ok(updated)
    }

    /// Delete an author; refused while books reference them
    pub async fn delete_author(&self, actor: &SessionUser, id: i32) -> AppResult<()> {
        let author = self.repository.authors.get_by_id(id).await?;
        if self.repository.authors.is_referenced(id).await? {
            return Err(AppError::Conflict(
                "Author is referenced by books and cannot be deleted".to_string(),
            ));
        }
        self.repository.authors.delete(id).await?;
        self.audit
            .record(self.entry(actor, AuditAction::Delete, "author", id, &author.name))
            .await?;
        Ok(())
    }

    // ---- Translators ----

    pub async fn list_translators(&self) -> AppResult<Vec<Translator>> {
        self.repository.translators.list().await
    }

    pub async fn get_translator(&self, id: i32) -> AppResult<Translator> {
        self.repository.translators.get_by_id(id).await
    }

    pub async fn create_translator(
        &self,
        actor: &SessionUser,
        translator: CreateTranslator,
    ) -> AppResult<Translator> {
        translator
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if let Some(language_id) = translator.language_id {
            self.repository
                .taxonomies
                .get_by_id(crate::repository::taxonomies::Taxonomy::Languages, language_id)
                .await?;
        }

        let slug = self.unique_translator_slug(&translator.name).await?;
        let created = self
            .repository
            .translators
            .create(&translator.name, &slug, translator.language_id)
            .await?;

        self.audit
            .record(self.entry(actor, AuditAction::Create, "translator", created.id, &created.name))
            .await?;
        Ok(created)
    }

    pub async fn update_translator(
        &self,
        actor: &SessionUser,
        id: i32,
        translator: UpdateTranslator,
    ) -> AppResult<Translator> {
        translator
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let existing = self.repository.translators.get_by_id(id).await?;

        if let Some(language_id) = translator.language_id {
            self.repository
                .taxonomies
                .get_by_id(crate::repository::taxonomies::Taxonomy::Languages, language_id)
                .await?;
        }

        let slug = match translator.name {
            Some(ref name) if *name != existing.name => {
                Some(self.unique_translator_slug(name).await?)
            }
            _ => None,
        };

        let updated = self
            .repository
            .translators
            .update(id, translator.name.as_deref(), slug.as_deref(), translator.language_id)
            .await?;

        self.audit
            .record(self.entry(actor, AuditAction::Update, "translator", id, &updated.name))
            .await?;
        Ok(updated)
    }

    /// Delete a translator; refused while books reference them
    pub async fn delete_translator(&self, actor: &SessionUser, id: i32) -> AppResult<()> {
        let translator = self.repository.translators.get_by_id(id).await?;
        if self.repository.translators.is_referenced(id).await? {
            return Err(AppError::Conflict(
                "Translator is referenced by books and cannot be deleted".to_string(),
            ));
        }
        self.repository.translators.delete(id).await?;
        self.audit
            .record(self.entry(actor, AuditAction::Delete, "translator", id, &translator.name))
            .await?;
        Ok(())
    }

    // ---- Roles ----

    pub async fn list_roles(&self) -> AppResult<Vec<Role>> {
        self.repository.roles.list().await
    }

    pub async fn get_role(&self, id: i32) -> AppResult<Role> {
        self.repository.roles.get_by_id(id).await
    }

    pub async fn create_role(&self, actor: &SessionUser, role: CreateRole) -> AppResult<Role> {
        role.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let slug = self.unique_role_slug(&role.name).await?;
        let created = self
            .repository
            .roles
            .create(&role.name, &slug, role.marc_code.as_deref())
            .await?;

        self.audit
            .record(self.entry(actor, AuditAction::Create, "role", created.id, &created.name))
            .await?;
        Ok(created)
    }

    pub async fn update_role(&self, actor: &SessionUser, id: i32, role: UpdateRole) -> AppResult<Role> {
        role.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let existing = self.repository.roles.get_by_id(id).await?;
        let slug = match role.name {
            Some(ref name) if *name != existing.name => {
                Some(self.unique_role_slug(name).await?)
            }
            _ => None,
        };

        let updated = self
            .repository
            .roles
            .update(id, role.name.as_deref(), slug.as_deref(), role.marc_code.as_deref())
            .await?;

        self.audit
            .record(self.entry(actor, AuditAction::Update, "role", id, &updated.name))
            .await?;
        Ok(updated)
    }

    pub async fn delete_role(&self, actor: &SessionUser, id: i32) -> AppResult<()> {
        let role = self.repository.roles.get_by_id(id).await?;
        self.repository.roles.delete(id).await?;
        self.audit
            .record(self.entry(actor, AuditAction::Delete, "role", id, &role.name))
            .await?;
        Ok(())
    }

    async fn unique_author_slug(&self, name: &str) -> AppResult<String> {
        super::unique_slug(name, |candidate| async move {
            self.repository.authors.slug_exists(&candidate).await
        })
        .await
    }

    async fn unique_translator_slug(&self, name: &str) -> AppResult<String> {
        super::unique_slug(name, |candidate| async move {
            self.repository.translators.slug_exists(&candidate).await
        })
        .await
    }

    async fn unique_role_slug(&self, name: &str) -> AppResult<String> {
        super::unique_slug(name, |candidate| async move {
            self.repository.roles.slug_exists(&candidate).await
        })
        .await
    }

    fn entry(
        &self,
        actor: &SessionUser,
        action: AuditAction,
        resource: &str,
        resource_id: i32,
        detail: &str,
    ) -> NewAuditEntry {
        NewAuditEntry {
            actor_id: Some(actor.user_id),
            actor_login: actor.login.clone(),
            action,
            resource: resource.to_string(),
            resource_id: Some(resource_id),
            detail: Some(detail.to_string()),
        }
    }
}
