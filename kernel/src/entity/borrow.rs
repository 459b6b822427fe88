mod borrow_date;
mod id;
mod return_date;

pub use self::{borrow_date::*, id::*, return_date::*};
use crate::entity::{BookId, UserId};
use destructure::Destructure;

/// A single loan of a book to a user.
///
/// A record is *open* while `return_date` is unset. The store never holds two
/// open records for the same book.
#[derive(Debug, Clone, Eq, PartialEq, Destructure)]
pub struct Borrow {
    id: BorrowId,
    user_id: UserId,
    book_id: BookId,
    borrow_date: BorrowDate,
    return_date: Option<ReturnDate>,
}

impl Borrow {
    pub fn new(
        id: BorrowId,
        user_id: UserId,
        book_id: BookId,
        borrow_date: BorrowDate,
        return_date: Option<ReturnDate>,
    ) -> Self {
        Self {
            id,
            user_id,
            book_id,
            borrow_date,
            return_date,
        }
    }

    pub fn open(id: BorrowId, user_id: UserId, book_id: BookId, borrow_date: BorrowDate) -> Self {
        Self::new(id, user_id, book_id, borrow_date, None)
    }

    pub fn id(&self) -> &BorrowId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn book_id(&self) -> &BookId {
        &self.book_id
    }

    pub fn borrow_date(&self) -> &BorrowDate {
        &self.borrow_date
    }

    pub fn return_date(&self) -> Option<&ReturnDate> {
        self.return_date.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }

    /// Marks the loan as returned. Returns `false` and leaves the record
    /// untouched when it was already closed.
    pub fn close(&mut self, return_date: ReturnDate) -> bool {
        if !self.is_open() {
            return false;
        }
        self.return_date = Some(return_date);
        true
    }
}

#[cfg(test)]
mod test {
    use time::macros::date;
    use uuid::Uuid;

    use crate::entity::{BookId, Borrow, BorrowDate, BorrowId, ReturnDate, UserId};

    fn open_borrow() -> Borrow {
        Borrow::open(
            BorrowId::new(Uuid::new_v4()),
            UserId::new(Uuid::new_v4()),
            BookId::new(Uuid::new_v4()),
            BorrowDate::new(date!(2024 - 01 - 01)),
        )
    }

    #[test]
    fn opened_record_has_no_return_date() {
        let borrow = open_borrow();
        assert!(borrow.is_open());
        assert!(borrow.return_date().is_none());
    }

    #[test]
    fn close_sets_return_date_once() {
        let mut borrow = open_borrow();
        assert!(borrow.close(ReturnDate::new(date!(2024 - 01 - 10))));
        assert!(!borrow.is_open());
        assert_eq!(
            borrow.return_date(),
            Some(&ReturnDate::new(date!(2024 - 01 - 10)))
        );

        assert!(!borrow.close(ReturnDate::new(date!(2024 - 01 - 11))));
        assert_eq!(
            borrow.return_date(),
            Some(&ReturnDate::new(date!(2024 - 01 - 10)))
        );
    }

    #[test]
    fn return_date_before_borrow_date_is_accepted() {
        let mut borrow = open_borrow();
        assert!(borrow.close(ReturnDate::new(date!(2023 - 12 - 31))));
    }
}
