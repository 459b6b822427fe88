use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{BookId, Borrow, BorrowId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BorrowQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &BorrowId,
    ) -> error_stack::Result<Option<Borrow>, KernelError>;
    /// The record of `book_id` whose return date is unset, if the book is out.
    async fn find_open_by_book_id(
        &self,
        con: &mut Self::Transaction,
        book_id: &BookId,
    ) -> error_stack::Result<Option<Borrow>, KernelError>;
    /// Every open record, ordered by borrow date then id.
    async fn find_all_open(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<Borrow>, KernelError>;
}

pub trait DependOnBorrowQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type BorrowQuery: BorrowQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn borrow_query(&self) -> &Self::BorrowQuery;
}
