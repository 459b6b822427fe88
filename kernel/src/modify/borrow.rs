use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::Borrow;
use crate::KernelError;

#[async_trait::async_trait]
pub trait BorrowModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    /// Fails with [`KernelError::Conflict`] when the book already has an open
    /// record, and with [`KernelError::NotFound`] when the user or book row is gone.
    async fn create(
        &self,
        con: &mut Self::Transaction,
        borrow: &Borrow,
    ) -> error_stack::Result<(), KernelError>;
    /// Writes the return date of a record that is still open in the store.
    /// Fails with [`KernelError::NotFound`] when the stored record is already closed.
    async fn update(
        &self,
        con: &mut Self::Transaction,
        borrow: &Borrow,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnBorrowModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type BorrowModifier: BorrowModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn borrow_modifier(&self) -> &Self::BorrowModifier;
}
