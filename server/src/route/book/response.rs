use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use application::transfer::{BookDetailsDto, BookDto, BookWithDetailsDto};

use crate::controller::Exhaust;
use crate::route::Envelope;

#[derive(Debug, Serialize)]
pub struct BookResponse {
    book_id: Uuid,
    title: String,
    isbn: String,
    published_date: Date,
    genre: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<BookDto> for BookResponse {
    fn from(value: BookDto) -> Self {
        Self {
            book_id: value.id,
            title: value.title,
            isbn: value.isbn,
            published_date: value.published_date,
            genre: value.genre,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Freshly cataloged book, answered with 201.
#[derive(Debug)]
pub struct CreatedBookResponse(BookResponse);

impl IntoResponse for CreatedBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct BookDetailsResponse {
    number_of_pages: i32,
    publisher: String,
    language: String,
}

impl From<BookDetailsDto> for BookDetailsResponse {
    fn from(value: BookDetailsDto) -> Self {
        Self {
            number_of_pages: value.number_of_pages,
            publisher: value.publisher,
            language: value.language,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookWithDetailsResponse {
    #[serde(flatten)]
    book: BookResponse,
    book_details: Option<BookDetailsResponse>,
}

impl From<BookWithDetailsDto> for BookWithDetailsResponse {
    fn from(value: BookWithDetailsDto) -> Self {
        Self {
            book: BookResponse::from(value.book),
            book_details: value.details.map(BookDetailsResponse::from),
        }
    }
}

impl IntoResponse for BookWithDetailsResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<BookDto> for Presenter {
    type To = CreatedBookResponse;
    fn emit(&self, input: BookDto) -> Self::To {
        CreatedBookResponse(BookResponse::from(input))
    }
}

impl Exhaust<Vec<BookDto>> for Presenter {
    type To = Json<Vec<BookResponse>>;
    fn emit(&self, input: Vec<BookDto>) -> Self::To {
        Json(input.into_iter().map(BookResponse::from).collect())
    }
}

impl Exhaust<Option<BookWithDetailsDto>> for Presenter {
    type To = Option<BookWithDetailsResponse>;
    fn emit(&self, input: Option<BookWithDetailsDto>) -> Self::To {
        input.map(BookWithDetailsResponse::from)
    }
}

impl Exhaust<BookWithDetailsDto> for Presenter {
    type To = Envelope<BookWithDetailsResponse>;
    fn emit(&self, input: BookWithDetailsDto) -> Self::To {
        Envelope::new(
            StatusCode::OK,
            "Book details updated successfully.",
            Some(BookWithDetailsResponse::from(input)),
        )
    }
}
