use serde::Deserialize;
use time::Date;
use uuid::Uuid;

use application::transfer::{BorrowBookDto, ReturnBookDto};

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct BorrowBookRequest {
    borrow_date: Date,
}

#[derive(Debug, Deserialize)]
pub struct ReturnBookRequest {
    return_date: Date,
}

pub struct Transformer;

impl Intake<(Uuid, Uuid, BorrowBookRequest)> for Transformer {
    type To = BorrowBookDto;
    fn emit(&self, input: (Uuid, Uuid, BorrowBookRequest)) -> Self::To {
        let (user_id, book_id, input) = input;
        BorrowBookDto {
            user_id,
            book_id,
            borrow_date: input.borrow_date,
        }
    }
}

impl Intake<(Uuid, ReturnBookRequest)> for Transformer {
    type To = ReturnBookDto;
    fn emit(&self, input: (Uuid, ReturnBookRequest)) -> Self::To {
        let (book_id, input) = input;
        ReturnBookDto {
            book_id,
            return_date: input.return_date,
        }
    }
}
