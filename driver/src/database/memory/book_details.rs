use error_stack::Report;

use kernel::interface::query::BookDetailsQuery;
use kernel::interface::update::BookDetailsModifier;
use kernel::prelude::entity::{BookDetails, BookId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryBookDetailsRepository;

#[async_trait::async_trait]
impl BookDetailsQuery for InMemoryBookDetailsRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_book_id(
        &self,
        con: &mut InMemoryTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<Option<BookDetails>, KernelError> {
        Ok(con.store().book_details.get(book_id.as_ref()).cloned())
    }
}

#[async_trait::async_trait]
impl BookDetailsModifier for InMemoryBookDetailsRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        details: &BookDetails,
    ) -> error_stack::Result<(), KernelError> {
        let store = con.store_mut();
        let book_id = details.book_id().as_ref();
        if !store.books.contains_key(book_id) {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("book {book_id} does not exist")));
        }
        if store.book_details.contains_key(book_id) {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable(format!("book {book_id} already has details")));
        }
        store.book_details.insert(*book_id, details.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        details: &BookDetails,
    ) -> error_stack::Result<(), KernelError> {
        let book_id = details.book_id().as_ref();
        match con.store_mut().book_details.get_mut(book_id) {
            Some(stored) => {
                *stored = details.clone();
                Ok(())
            }
            None => Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("book {book_id} has no details"))),
        }
    }
}
