mod genre;
mod id;
mod isbn;
mod published_date;
mod title;

pub use self::{genre::*, id::*, isbn::*, published_date::*, title::*};
use crate::entity::common::{CreatedAt, UpdatedAt};
use destructure::{Destructure, Mutation};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    isbn: BookIsbn,
    published_date: PublishedDate,
    genre: BookGenre,
    created_at: CreatedAt<Book>,
    updated_at: UpdatedAt<Book>,
}

impl Book {
    pub fn new(
        id: BookId,
        title: BookTitle,
        isbn: BookIsbn,
        published_date: PublishedDate,
        genre: BookGenre,
        created_at: CreatedAt<Book>,
        updated_at: UpdatedAt<Book>,
    ) -> Self {
        Self {
            id,
            title,
            isbn,
            published_date,
            genre,
            created_at,
            updated_at,
        }
    }
}
