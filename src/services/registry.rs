//! ISBN registry client and import service.
//!
//! Lookup issues one SRU searchRetrieve request against the registry and
//! translates the MARCXML response. Import turns a looked-up record into a
//! catalog book, creating the author and publisher rows it needs.

use reqwest::Client;
use std::time::Duration;
use validator::Validate;

use crate::{
    config::RegistryConfig,
    error::{AppError, AppResult},
    marcxml::MarcxmlRecord,
    models::{
        audit::{AuditAction, NewAuditEntry},
        author::Author,
        book::{Book, CreateBook},
        publisher::Publisher,
        record::{BiblioRecord, ImportRequest},
        user::SessionUser,
    },
    repository::{taxonomies::Taxonomy, Repository},
    services::audit::AuditService,
};

#[derive(Clone)]
pub struct RegistryService {
    repository: Repository,
    config: RegistryConfig,
    client: Client,
    audit: AuditService,
}

impl RegistryService {
    pub fn new(
        repository: Repository,
        config: RegistryConfig,
        audit: AuditService,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build registry client: {}", e)))?;
        Ok(Self {
            repository,
            config,
            client,
            audit,
        })
    }

    /// Fetch the bibliographic record for an ISBN from the registry
    pub async fn lookup(&self, isbn: &str) -> AppResult<BiblioRecord> {
        let isbn = isbn.trim();
        if isbn.len() < 10 || isbn.len() > 17 {
            return Err(AppError::Validation(format!("Invalid ISBN: {}", isbn)));
        }

        tracing::debug!("Registry lookup for ISBN {}", isbn);
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("version", "1.1"),
                ("operation", "searchRetrieve"),
                ("recordSchema", "marcxml"),
                ("maximumRecords", "1"),
                ("query", &format!("bath.isbn={}", isbn)),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::RegistryTimeout(format!("Registry did not answer for ISBN {}", isbn))
                } else {
                    AppError::Registry(format!("Registry request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            return Err(AppError::Registry(format!(
                "Registry answered with status {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Registry(format!("Failed to read registry response: {}", e)))?;

        let records = MarcxmlRecord::parse_all(&body);
        let marc = records
            .first()
            .ok_or_else(|| AppError::NotFound(format!("No record found for ISBN {}", isbn)))?;

        let record = BiblioRecord::from_marcxml(marc);
        if record.title.is_none() {
            return Err(AppError::Registry(format!(
                "Registry record for ISBN {} carries no title",
                isbn
            )));
        }
        Ok(record)
    }

    /// Look up an ISBN and create the corresponding book, along with any
    /// author and publisher rows it needs
    pub async fn import(&self, actor: &SessionUser, request: ImportRequest) -> AppResult<Book> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if let Some(existing) = self.repository.books.find_by_isbn(&request.isbn).await? {
            return Err(AppError::Conflict(format!(
                "A book with ISBN {} already exists (id={})",
                request.isbn, existing.id
            )));
        }

        let record = self.lookup(&request.isbn).await?;
        // lookup already rejected titleless records
        let title = match (&record.title, &record.subtitle) {
            (Some(title), Some(subtitle)) => format!("{}: {}", title, subtitle),
            (Some(title), None) => title.clone(),
            _ => return Err(AppError::Registry("Record carries no title".to_string())),
        };

        let author_id = match record.authors.first() {
            Some(name) => Some(self.find_or_create_author(name).await?.id),
            None => None,
        };
        let publisher_id = match record.publisher {
            Some(ref name) => Some(self.find_or_create_publisher(name).await?.id),
            None => None,
        };
        let language_id = match record.language_code {
            Some(ref code) => self
                .repository
                .taxonomies
                .find_by_code(Taxonomy::Languages, code)
                .await?
                .map(|l| l.id),
            None => None,
        };

        let create = CreateBook {
            title,
            isbn: record.isbn.clone().or(Some(request.isbn.clone())),
            author_id,
            publisher_id,
            category_id: None,
            language_id,
            format_id: None,
            translator_id: None,
            pages: record.pages,
            publication_year: record.publication_year,
            summary: None,
            available: true,
        };

        let book_slug = self.unique_book_slug(&create.title).await?;
        let book = self.repository.books.create(&create, &book_slug).await?;

        self.audit
            .record(NewAuditEntry {
                actor_id: Some(actor.user_id),
                actor_login: actor.login.clone(),
                action: AuditAction::Import,
                resource: "book".to_string(),
                resource_id: Some(book.id),
                detail: Some(format!("ISBN {}", request.isbn)),
            })
            .await?;

        tracing::info!("Imported ISBN {} as book {}", request.isbn, book.id);
        Ok(book)
    }

    async fn find_or_create_author(&self, name: &str) -> AppResult<Author> {
        if let Some(author) = self.repository.authors.find_by_name(name).await? {
            return Ok(author);
        }
        let slug = super::unique_slug(name, |candidate| async move {
            self.repository.authors.slug_exists(&candidate).await
        })
        .await?;
        self.repository.authors.create(name, &slug, None, None).await
    }

    async fn find_or_create_publisher(&self, name: &str) -> AppResult<Publisher> {
        if let Some(publisher) = self.repository.publishers.find_by_name(name).await? {
            return Ok(publisher);
        }
        let slug = super::unique_slug(name, |candidate| async move {
            self.repository.publishers.slug_exists(&candidate).await
        })
        .await?;
        self.repository.publishers.create(name, &slug, None, None).await
    }

    async fn unique_book_slug(&self, title: &str) -> AppResult<String> {
        super::unique_slug(title, |candidate| async move {
            self.repository.books.slug_exists(&candidate).await
        })
        .await
    }
}
