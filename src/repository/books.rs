//! Books repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
};

const SELECT: &str = r#"
    SELECT b.*,
           a.name AS author_name,
           p.name AS publisher_name,
           c.name AS category_name
    FROM books b
    LEFT JOIN authors a ON b.author_id = a.id
    LEFT JOIN publishers p ON b.publisher_id = p.id
    LEFT JOIN categories c ON b.category_id = c.id
"#;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List the full book collection in server order, with joined display
    /// names for the collection view's search and sort fields
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let query = format!("{} ORDER BY b.id", SELECT);
        let books = sqlx::query_as::<_, Book>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        let query = format!("{} WHERE b.id = $1", SELECT);
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Find a book by normalized ISBN
    pub async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        let query = format!("{} WHERE b.isbn = $1", SELECT);
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    /// Check if a slug already exists
    pub async fn slug_exists(&self, slug: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE slug = $1)")
            .bind(slug)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Insert a new book
    pub async fn create(&self, book: &CreateBook, slug: &str) -> AppResult<Book> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO books (title, slug, isbn, author_id, publisher_id, category_id,
                               language_id, format_id, translator_id, pages,
                               publication_year, summary, available)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id
            "#,
        )
        .bind(&book.title)
        .bind(slug)
        .bind(&book.isbn)
        .bind(book.author_id)
        .bind(book.publisher_id)
        .bind(book.category_id)
        .bind(book.language_id)
        .bind(book.format_id)
        .bind(book.translator_id)
        .bind(book.pages)
        .bind(book.publication_year)
        .bind(&book.summary)
        .bind(book.available)
        .fetch_one(&self.pool)
        .await?;
        self.get_by_id(id).await
    }

    /// Partially update a book; None fields are left unchanged
    pub async fn update(&self, id: i32, book: &UpdateBook, slug: Option<&str>) -> AppResult<Book> {
        let result = sqlx::query(
            r#"
            UPDATE books SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                isbn = COALESCE($4, isbn),
                author_id = COALESCE($5, author_id),
                publisher_id = COALESCE($6, publisher_id),
                category_id = COALESCE($7, category_id),
                language_id = COALESCE($8, language_id),
                format_id = COALESCE($9, format_id),
                translator_id = COALESCE($10, translator_id),
                pages = COALESCE($11, pages),
                publication_year = COALESCE($12, publication_year),
                summary = COALESCE($13, summary),
                available = COALESCE($14, available),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&book.title)
        .bind(slug)
        .bind(&book.isbn)
        .bind(book.author_id)
        .bind(book.publisher_id)
        .bind(book.category_id)
        .bind(book.language_id)
        .bind(book.format_id)
        .bind(book.translator_id)
        .bind(book.pages)
        .bind(book.publication_year)
        .bind(&book.summary)
        .bind(book.available)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        self.get_by_id(id).await
    }

    /// Delete a book
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        Ok(())
    }
}
