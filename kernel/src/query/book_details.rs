use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{BookDetails, BookId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookDetailsQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_book_id(
        &self,
        con: &mut Self::Transaction,
        book_id: &BookId,
    ) -> error_stack::Result<Option<BookDetails>, KernelError>;
}

pub trait DependOnBookDetailsQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookDetailsQuery: BookDetailsQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn book_details_query(&self) -> &Self::BookDetailsQuery;
}
