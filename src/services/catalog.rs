//! Catalog service: books and publishers

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        audit::{AuditAction, NewAuditEntry},
        book::{Book, CreateBook, UpdateBook},
        publisher::{CreatePublisher, Publisher, UpdatePublisher},
        user::SessionUser,
    },
    repository::Repository,
    services::audit::AuditService,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    audit: AuditService,
}

impl CatalogService {
    pub fn new(repository: Repository, audit: AuditService) -> Self {
        Self { repository, audit }
    }

    // ---- Books ----

    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Create a book with ISBN deduplication and slug assignment
    pub async fn create_book(&self, actor: &SessionUser, book: CreateBook) -> AppResult<Book> {
        book.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if let Some(ref isbn) = book.isbn {
            if let Some(existing) = self.repository.books.find_by_isbn(isbn).await? {
                return Err(AppError::Conflict(format!(
                    "A book with ISBN {} already exists (id={})",
                    isbn, existing.id
                )));
            }
        }

        let slug = self.unique_book_slug(&book.title).await?;
        let created = self.repository.books.create(&book, &slug).await?;

        self.audit
            .record(audit_entry(actor, AuditAction::Create, "book", created.id, &created.title))
            .await?;
        Ok(created)
    }

    /// Update a book; a title change re-slugs it
    pub async fn update_book(&self, actor: &SessionUser, id: i32, book: UpdateBook) -> AppResult<Book> {
        book.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let existing = self.repository.books.get_by_id(id).await?;

        if let Some(ref isbn) = book.isbn {
            if let Some(dup) = self.repository.books.find_by_isbn(isbn).await? {
                if dup.id != id {
                    return Err(AppError::Conflict(format!(
                        "A book with ISBN {} already exists (id={})",
                        isbn, dup.id
                    )));
                }
            }
        }

        let slug = match book.title {
            Some(ref title) if *title != existing.title => {
                Some(self.unique_book_slug(title).await?)
            }
            _ => None,
        };

        let updated = self
            .repository
            .books
            .update(id, &book, slug.as_deref())
            .await?;

        self.audit
            .record(audit_entry(actor, AuditAction::Update, "book", id, &updated.title))
            .await?;
        Ok(updated)
    }

    pub async fn delete_book(&self, actor: &SessionUser, id: i32) -> AppResult<()> {
        let book = self.repository.books.get_by_id(id).await?;
        self.repository.books.delete(id).await?;
        self.audit
            .record(audit_entry(actor, AuditAction::Delete, "book", id, &book.title))
            .await?;
        Ok(())
    }

    // ---- Publishers ----

    pub async fn list_publishers(&self) -> AppResult<Vec<Publisher>> {
        self.repository.publishers.list().await
    }

    pub async fn get_publisher(&self, id: i32) -> AppResult<Publisher> {
        self.repository.publishers.get_by_id(id).await
    }

    pub async fn create_publisher(
        &self,
        actor: &SessionUser,
        publisher: CreatePublisher,
    ) -> AppResult<Publisher> {
        publisher
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if let Some(existing) = self
            .repository
            .publishers
            .find_by_name(&publisher.name)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Publisher '{}' already exists (id={})",
                publisher.name, existing.id
            )));
        }

        let slug = self.unique_publisher_slug(&publisher.name).await?;
        let created = self
            .repository
            .publishers
            .create(
                &publisher.name,
                &slug,
                publisher.city.as_deref(),
                publisher.website.as_deref(),
            )
            .await?;

        self.audit
            .record(audit_entry(actor, AuditAction::Create, "publisher", created.id, &created.name))
            .await?;
        Ok(created)
    }

    pub async fn update_publisher(
        &self,
        actor: &SessionUser,
        id: i32,
        publisher: UpdatePublisher,
    ) -> AppResult<Publisher> {
        publisher
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let existing = self.repository.publishers.get_by_id(id).await?;
        let slug = match publisher.name {
            Some(ref name) if *name != existing.name => {
                Some(self.unique_publisher_slug(name).await?)
            }
            _ => None,
        };

        let updated = self
            .repository
            .publishers
            .update(
                id,
                publisher.name.as_deref(),
                slug.as_deref(),
                publisher.city.as_deref(),
                publisher.website.as_deref(),
            )
            .await?;

        self.audit
            .record(audit_entry(actor, AuditAction::Update, "publisher", id, &updated.name))
            .await?;
        Ok(updated)
    }

    /// Delete a publisher; refused while books reference it
    pub async fn delete_publisher(&self, actor: &SessionUser, id: i32) -> AppResult<()> {
        let publisher = self.repository.publishers.get_by_id(id).await?;
        if self.repository.publishers.is_referenced(id).await? {
            return Err(AppError::Conflict(
                "Publisher is referenced by books and cannot be deleted".to_string(),
            ));
        }
        self.repository.publishers.delete(id).await?;
        self.audit
            .record(audit_entry(actor, AuditAction::Delete, "publisher", id, &publisher.name))
            .await?;
        Ok(())
    }

    async fn unique_book_slug(&self, title: &str) -> AppResult<String> {
        super::unique_slug(title, |candidate| async move {
            self.repository.books.slug_exists(&candidate).await
        })
        .await
    }

    async fn unique_publisher_slug(&self, name: &str) -> AppResult<String> {
        super::unique_slug(name, |candidate| async move {
            self.repository.publishers.slug_exists(&candidate).await
        })
        .await
    }
}

fn audit_entry(
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
