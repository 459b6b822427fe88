use axum::http::StatusCode;
use serde::Serialize;
use time::Date;
use uuid::Uuid;

use application::transfer::BorrowDto;

use crate::controller::Exhaust;
use crate::route::Envelope;

#[derive(Debug, Serialize)]
pub struct BorrowResponse {
    id: Uuid,
    user_id: Uuid,
    book_id: Uuid,
    borrow_date: Date,
    return_date: Option<Date>,
}

impl From<BorrowDto> for BorrowResponse {
    fn from(value: BorrowDto) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            book_id: value.book_id,
            borrow_date: value.borrow_date,
            return_date: value.return_date,
        }
    }
}

pub struct BorrowedPresenter;

impl Exhaust<BorrowDto> for BorrowedPresenter {
    type To = Envelope<()>;
    fn emit(&self, _: BorrowDto) -> Self::To {
        Envelope::new(StatusCode::OK, "Book borrowed successfully.", None)
    }
}

pub struct ReturnedPresenter;

impl Exhaust<BorrowDto> for ReturnedPresenter {
    type To = Envelope<()>;
    fn emit(&self, _: BorrowDto) -> Self::To {
        Envelope::new(StatusCode::OK, "Book returned successfully.", None)
    }
}

pub struct Presenter;

impl Exhaust<Vec<BorrowDto>> for Presenter {
    type To = Envelope<Vec<BorrowResponse>>;
    fn emit(&self, input: Vec<BorrowDto>) -> Self::To {
        let data = input.into_iter().map(BorrowResponse::from).collect();
        Envelope::new(StatusCode::OK, "Currently borrowed books.", Some(data))
    }
}
