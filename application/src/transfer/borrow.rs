use time::Date;
use uuid::Uuid;

use kernel::prelude::entity::{Borrow, DestructBorrow};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BorrowDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub borrow_date: Date,
    pub return_date: Option<Date>,
}

impl From<Borrow> for BorrowDto {
    fn from(value: Borrow) -> Self {
        let DestructBorrow {
            id,
            user_id,
            book_id,
            borrow_date,
            return_date,
        } = value.into_destruct();
        Self {
            id: id.into(),
            user_id: user_id.into(),
            book_id: book_id.into(),
            borrow_date: borrow_date.into(),
            return_date: return_date.map(Date::from),
        }
    }
}

pub struct BorrowBookDto {
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub borrow_date: Date,
}

pub struct ReturnBookDto {
    pub book_id: Uuid,
    pub return_date: Date,
}
