use time::{Date, OffsetDateTime};
use uuid::Uuid;

use kernel::prelude::entity::{Book, BookDetails, DestructBook, DestructBookDetails};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookDto {
    pub id: Uuid,
    pub title: String,
    pub isbn: String,
    pub published_date: Date,
    pub genre: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            title,
            isbn,
            published_date,
            genre,
            created_at,
            updated_at,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            isbn: isbn.into(),
            published_date: published_date.into(),
            genre: genre.into(),
            created_at: created_at.into(),
            updated_at: updated_at.into(),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookDetailsDto {
    pub number_of_pages: i32,
    pub publisher: String,
    pub language: String,
}

impl From<BookDetails> for BookDetailsDto {
    fn from(value: BookDetails) -> Self {
        let DestructBookDetails {
            number_of_pages,
            publisher,
            language,
            ..
        } = value.into_destruct();
        Self {
            number_of_pages: number_of_pages.into(),
            publisher: publisher.into(),
            language: language.into(),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookWithDetailsDto {
    pub book: BookDto,
    pub details: Option<BookDetailsDto>,
}

pub struct GetBookDto {
    pub id: Uuid,
}

pub struct CreateBookDto {
    pub title: String,
    pub isbn: String,
    pub published_date: Date,
    pub genre: String,
}

pub struct UpdateBookDto {
    pub id: Uuid,
    pub title: String,
    pub isbn: String,
    pub published_date: Date,
    pub genre: String,
    pub details: BookDetailsDto,
}
