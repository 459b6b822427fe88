use std::cmp::Reverse;

use error_stack::Report;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{Book, BookId, BookIsbn};
use kernel::KernelError;

use crate::database::memory::{InMemoryTransaction, MemoryStore};

pub struct InMemoryBookRepository;

#[async_trait::async_trait]
impl BookQuery for InMemoryBookRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(con.store().books.get(id.as_ref()).cloned())
    }

    async fn find_by_isbn(
        &self,
        con: &mut InMemoryTransaction,
        isbn: &BookIsbn,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let found = con
            .store()
            .books
            .values()
            .find(|book| book.isbn() == isbn)
            .cloned();
        Ok(found)
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let mut books = con.store().books.values().cloned().collect::<Vec<_>>();
        books.sort_by_key(|book| (Reverse(*book.created_at().as_ref()), *book.id().as_ref()));
        Ok(books)
    }
}

#[async_trait::async_trait]
impl BookModifier for InMemoryBookRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        let store = con.store_mut();
        if store.books.contains_key(book.id().as_ref()) || isbn_held_elsewhere(store, book) {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable(format!("isbn {:?} is already cataloged", book.isbn())));
        }
        store.books.insert(*book.id().as_ref(), book.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        let store = con.store_mut();
        if !store.books.contains_key(book.id().as_ref()) {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("book {} does not exist", book.id().as_ref())));
        }
        if isbn_held_elsewhere(store, book) {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable(format!("isbn {:?} is already cataloged", book.isbn())));
        }
        store.books.insert(*book.id().as_ref(), book.clone());
        Ok(())
    }
}

fn isbn_held_elsewhere(store: &MemoryStore, book: &Book) -> bool {
    store
        .books
        .values()
        .any(|other| other.isbn() == book.isbn() && other.id() != book.id())
}
