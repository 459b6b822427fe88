use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::BookDetails;
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookDetailsModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        details: &BookDetails,
    ) -> error_stack::Result<(), KernelError>;
    async fn update(
        &self,
        con: &mut Self::Transaction,
        details: &BookDetails,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnBookDetailsModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookDetailsModifier: BookDetailsModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn book_details_modifier(&self) -> &Self::BookDetailsModifier;
}
