//! Repository layer for database operations.
//!
//! Repositories are thin sqlx wrappers. List queries return the full
//! collection in server order (`ORDER BY id`); searching, filtering, and
//! sorting happen in the in-memory collection view, not in SQL.

pub mod audit;
pub mod authors;
pub mod books;
pub mod penalties;
pub mod publishers;
pub mod roles;
pub mod taxonomies;
pub mod translators;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
    pub publishers: publishers::PublishersRepository,
    pub taxonomies: taxonomies::TaxonomiesRepository,
    pub translators: translators::TranslatorsRepository,
    pub roles: roles::RolesRepository,
    pub users: users::UsersRepository,
    pub penalties: penalties::PenaltiesRepository,
    pub audit: audit::AuditRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            publishers: publishers::PublishersRepository::new(pool.clone()),
            taxonomies: taxonomies::TaxonomiesRepository::new(pool.clone()),
            translators: translators::TranslatorsRepository::new(pool.clone()),
            roles: roles::RolesRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            penalties: penalties::PenaltiesRepository::new(pool.clone()),
            audit: audit::AuditRepository::new(pool.clone()),
            pool,
        }
    }
}
