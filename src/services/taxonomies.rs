//! Taxonomy service: categories, languages, and formats behind one CRUD
//! surface, dispatched on [`Taxonomy`].

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        audit::{AuditAction, NewAuditEntry},
        taxonomy::{CreateLookup, Lookup, UpdateLookup},
        user::SessionUser,
    },
    repository::{taxonomies::Taxonomy, Repository},
    services::audit::AuditService,
};

#[derive(Clone)]
pub struct TaxonomiesService {
    repository: Repository,
    audit: AuditService,
}

impl TaxonomiesService {
    pub fn new(repository: Repository, audit: AuditService) -> Self {
        Self { repository, audit }
    }

    pub async fn list(&self, taxonomy: Taxonomy) -> AppResult<Vec<Lookup>> {
        self.repository.taxonomies.list(taxonomy).await
    }

    pub async fn get(&self, taxonomy: Taxonomy, id: i32) -> AppResult<Lookup> {
        self.repository.taxonomies.get_by_id(taxonomy, id).await
    }

    pub async fn create(
        &self,
        actor: &SessionUser,
        taxonomy: Taxonomy,
        lookup: CreateLookup,
    ) -> AppResult<Lookup> {
        lookup
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if let Some(existing) = self
            .repository
            .taxonomies
            .find_by_name(taxonomy, &lookup.name)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "{} '{}' already exists (id={})",
                taxonomy.resource(),
                lookup.name,
                existing.id
            )));
        }

        let slug = self.unique_slug(taxonomy, &lookup.name).await?;
        let created = self
            .repository
            .taxonomies
            .create(taxonomy, &lookup.name, &slug, lookup.code.as_deref())
            .await?;

        self.audit
            .record(self.entry(actor, AuditAction::Create, taxonomy, created.id, &created.name))
            .await?;
        Ok(created)
    }

    pub async fn update(
        &self,
        actor: &SessionUser,
        taxonomy: Taxonomy,
        id: i32,
        lookup: UpdateLookup,
    ) -> AppResult<Lookup> {
        lookup
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let existing = self.repository.taxonomies.get_by_id(taxonomy, id).await?;
        let slug = match lookup.name {
            Some(ref name) if *name != existing.name => {
                Some(self.unique_slug(taxonomy, name).await?)
            }
            _ => None,
        };

        let updated = self
            .repository
            .taxonomies
            .update(
                taxonomy,
                id,
                lookup.name.as_deref(),
                slug.as_deref(),
                lookup.code.as_deref(),
            )
            .await?;

        self.audit
            .record(self.entry(actor, AuditAction::Update, taxonomy, id, &updated.name))
            .await?;
        Ok(updated)
    }

    /// Delete a lookup row; refused while books reference it
    pub async fn delete(&self, actor: &SessionUser, taxonomy: Taxonomy, id: i32) -> AppResult<()> {
        let lookup = self.repository.taxonomies.get_by_id(taxonomy, id).await?;
        if self.repository.taxonomies.is_referenced(taxonomy, id).await? {
            return Err(AppError::Conflict(format!(
                "{} is referenced by books and cannot be deleted",
                taxonomy.resource()
            )));
        }
        self.repository.taxonomies.delete(taxonomy, id).await?;
        self.audit
            .record(self.entry(actor, AuditAction::Delete, taxonomy, id, &lookup.name))
            .await?;
        Ok(())
    }

    async fn unique_slug(&self, taxonomy: Taxonomy, name: &str) -> AppResult<String> {
        super::unique_slug(name, |candidate| async move {
            self.repository
                .taxonomies
                .slug_exists(taxonomy, &candidate)
                .await
        })
        .await
    }

    fn entry(
        &self,
        actor: &SessionUser,
        action: AuditAction,
        taxonomy: Taxonomy,
        resource_id: i32,
        detail: &str,
    ) -> NewAuditEntry {
        NewAuditEntry {
            actor_id: Some(actor.user_id),
            actor_login: actor.login.clone(),
            action,
            resource: taxonomy.resource().to_string(),
            resource_id: Some(resource_id),
            detail: Some(detail.to_string()),
        }
    }
}
