//! Business logic services

pub mod audit;
pub mod catalog;
pub mod contributors;
pub mod penalties;
pub mod redis;
pub mod registry;
pub mod sessions;
pub mod taxonomies;
pub mod users;

use std::future::Future;

use crate::{
    config::{RegistryConfig, SessionConfig},
    error::{AppError, AppResult},
    repository::Repository,
    slug,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub repository: Repository,
    pub sessions: sessions::SessionsService,
    pub catalog: catalog::CatalogService,
    pub contributors: contributors::ContributorsService,
    pub taxonomies: taxonomies::TaxonomiesService,
    pub users: users::UsersService,
    pub penalties: penalties::PenaltiesService,
    pub audit: audit::AuditService,
    pub registry: registry::RegistryService,
    pub redis: redis::RedisService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        session_config: SessionConfig,
        registry_config: RegistryConfig,
        redis_service: redis::RedisService,
    ) -> AppResult<Self> {
        let audit = audit::AuditService::new(repository.clone());
        Ok(Self {
            sessions: sessions::SessionsService::new(
                repository.clone(),
                session_config,
                redis_service.clone(),
                audit.clone(),
            ),
            catalog: catalog::CatalogService::new(repository.clone(), audit.clone()),
            contributors: contributors::ContributorsService::new(repository.clone(), audit.clone()),
            taxonomies: taxonomies::TaxonomiesService::new(repository.clone(), audit.clone()),
            users: users::UsersService::new(repository.clone(), audit.clone()),
            penalties: penalties::PenaltiesService::new(repository.clone(), audit.clone()),
            registry: registry::RegistryService::new(
                repository.clone(),
                registry_config,
                audit.clone(),
            )?,
            audit,
            redis: redis_service,
            repository,
        })
    }
}

/// Slugify a display name and suffix it (-2, -3, ...) until the existence
/// check clears; refuses after 999 candidates instead of looping forever.
pub(crate) async fn unique_slug<F, Fut>(name: &str, slug_exists: F) -> AppResult<String>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = AppResult<bool>>,
{
    let base = slug::slugify(name);
    if !slug_exists(base.clone()).await? {
        return Ok(base);
    }
    for n in 2..1000 {
        let candidate = slug::with_suffix(&base, n);
        if !slug_exists(candidate.clone()).await? {
            return Ok(candidate);
        }
    }
    Err(AppError::Conflict(format!(
        "Cannot build a unique slug for '{}'",
        name
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[tokio::test]
    async fn unique_slug_takes_the_base_when_free() {
        let slug = unique_slug("Jane Doe", |_| async { Ok::<_, AppError>(false) })
            .await
            .unwrap();
        assert_eq!(slug, "jane-doe");
    }

    #[tokio::test]
    async fn unique_slug_suffixes_past_taken_candidates() {
        let taken: HashSet<&str> = ["jane-doe", "jane-doe-2"].into_iter().collect();
        let taken = &taken;
        let slug = unique_slug("Jane Doe", |candidate| async move {
            Ok::<_, AppError>(taken.contains(candidate.as_str()))
        })
        .await
        .unwrap();
        assert_eq!(slug, "jane-doe-3");
    }

    #[tokio::test]
    async fn unique_slug_refuses_when_every_candidate_is_taken() {
        let result = unique_slug("Jane Doe", |_| async { Ok::<_, AppError>(true) }).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }
}
