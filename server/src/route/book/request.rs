use serde::Deserialize;
use time::Date;
use uuid::Uuid;

use application::transfer::{BookDetailsDto, CreateBookDto, GetBookDto, UpdateBookDto};

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    title: String,
    isbn: String,
    published_date: Date,
    genre: String,
}

#[derive(Debug, Deserialize)]
pub struct BookDetailsRequest {
    number_of_pages: i32,
    publisher: String,
    language: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookRequest {
    title: String,
    isbn: String,
    published_date: Date,
    genre: String,
    book_details: BookDetailsRequest,
}

#[derive(Debug)]
pub struct GetBookRequest {
    id: Uuid,
}

impl GetBookRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct Transformer;

impl Intake<CreateBookRequest> for Transformer {
    type To = CreateBookDto;
    fn emit(&self, input: CreateBookRequest) -> Self::To {
        CreateBookDto {
            title: input.title,
            isbn: input.isbn,
            published_date: input.published_date,
            genre: input.genre,
        }
    }
}

impl Intake<GetBookRequest> for Transformer {
    type To = GetBookDto;
    fn emit(&self, input: GetBookRequest) -> Self::To {
        GetBookDto { id: input.id }
    }
}

impl Intake<(Uuid, UpdateBookRequest)> for Transformer {
    type To = UpdateBookDto;
    fn emit(&self, input: (Uuid, UpdateBookRequest)) -> Self::To {
        let (id, input) = input;
        UpdateBookDto {
            id,
            title: input.title,
            isbn: input.isbn,
            published_date: input.published_date,
            genre: input.genre,
            details: BookDetailsDto {
                number_of_pages: input.book_details.number_of_pages,
                publisher: input.book_details.publisher,
                language: input.book_details.language,
            },
        }
    }
}
