mod language;
mod pages;
mod publisher;

pub use self::{language::*, pages::*, publisher::*};
use crate::entity::BookId;
use destructure::{Destructure, Mutation};
use vodca::References;

/// Bibliographic metadata kept one-to-one with a [`Book`](crate::entity::Book).
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct BookDetails {
    book_id: BookId,
    number_of_pages: NumberOfPages,
    publisher: Publisher,
    language: Language,
}

impl BookDetails {
    pub fn new(
        book_id: BookId,
        number_of_pages: NumberOfPages,
        publisher: Publisher,
        language: Language,
    ) -> Self {
        Self {
            book_id,
            number_of_pages,
            publisher,
            language,
        }
    }
}
