//! Repository layer for database operations
//!
//! Each entity kind gets its own trait so pipelines depend on storage
//! behavior, not on a concrete driver. The production implementations in
//! [`postgres`] share one connection pool.

pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        Author, AuthorData, Book, BookInstance, BookInstanceData, BookInstanceWithBook, BookRef,
        Genre, GenreData,
    },
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// All authors, sorted by family name
    async fn find_all(&self) -> AppResult<Vec<Author>>;
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Author>>;
    async fn create(&self, data: &AuthorData) -> AppResult<Author>;
    /// Full replacement of the record at `id`
    async fn update(&self, id: i32, data: &AuthorData) -> AppResult<Author>;
    /// Deleting an absent id is a no-op
    async fn delete(&self, id: i32) -> AppResult<()>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait GenreRepository: Send + Sync {
    /// All genres, sorted by name
    async fn find_all(&self) -> AppResult<Vec<Genre>>;
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Genre>>;
    /// Exact, case-sensitive name match
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Genre>>;
    async fn create(&self, data: &GenreData) -> AppResult<Genre>;
    async fn update(&self, id: i32, data: &GenreData) -> AppResult<Genre>;
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Books are maintained by another application; this one only reads them.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Id/title projection of all books, for form select lists
    async fn find_all(&self) -> AppResult<Vec<BookRef>>;
    async fn find_by_author(&self, author_id: i32) -> AppResult<Vec<Book>>;
    async fn find_by_genre(&self, genre_id: i32) -> AppResult<Vec<Book>>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait BookInstanceRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<BookInstanceWithBook>>;
    async fn find_by_id(&self, id: i32) -> AppResult<Option<BookInstance>>;
    /// Instance joined with its book title, for the detail view
    async fn find_detail(&self, id: i32) -> AppResult<Option<BookInstanceWithBook>>;
    async fn create(&self, data: &BookInstanceData) -> AppResult<BookInstance>;
    async fn update(&self, id: i32, data: &BookInstanceData) -> AppResult<BookInstance>;
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Container handing one repository per entity kind to the service layer
#[derive(Clone)]
pub struct Repository {
    pub authors: Arc<dyn AuthorRepository>,
    pub genres: Arc<dyn GenreRepository>,
    pub books: Arc<dyn BookRepository>,
    pub book_instances: Arc<dyn BookInstanceRepository>,
}

impl Repository {
    /// PostgreSQL-backed repository set sharing the given pool
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self {
            authors: Arc::new(postgres::PgAuthorRepository::new(pool.clone())),
            genres: Arc::new(postgres::PgGenreRepository::new(pool.clone())),
            books: Arc::new(postgres::PgBookRepository::new(pool.clone())),
            book_instances: Arc::new(postgres::PgBookInstanceRepository::new(pool)),
        }
    }
}
