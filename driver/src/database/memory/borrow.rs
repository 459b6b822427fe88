use error_stack::Report;

use kernel::interface::query::BorrowQuery;
use kernel::interface::update::BorrowModifier;
use kernel::prelude::entity::{BookId, Borrow, BorrowId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryBorrowRepository;

#[async_trait::async_trait]
impl BorrowQuery for InMemoryBorrowRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &BorrowId,
    ) -> error_stack::Result<Option<Borrow>, KernelError> {
        Ok(con.store().borrows.get(id.as_ref()).cloned())
    }

    async fn find_open_by_book_id(
        &self,
        con: &mut InMemoryTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<Option<Borrow>, KernelError> {
        let found = con
            .store()
            .borrows
            .values()
            .find(|borrow| borrow.is_open() && borrow.book_id() == book_id)
            .cloned();
        Ok(found)
    }

    async fn find_all_open(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Borrow>, KernelError> {
        let mut open = con
            .store()
            .borrows
            .values()
            .filter(|borrow| borrow.is_open())
            .cloned()
            .collect::<Vec<_>>();
        open.sort_by_key(|borrow| (*borrow.borrow_date(), *borrow.id().as_ref()));
        Ok(open)
    }
}

#[async_trait::async_trait]
impl BorrowModifier for InMemoryBorrowRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        borrow: &Borrow,
    ) -> error_stack::Result<(), KernelError> {
        let store = con.store_mut();
        if !store.users.contains_key(borrow.user_id().as_ref())
            || !store.books.contains_key(borrow.book_id().as_ref())
        {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable("borrow references a missing user or book"));
        }
        let already_out = store
            .borrows
            .values()
            .any(|other| other.is_open() && other.book_id() == borrow.book_id());
        if borrow.is_open() && already_out {
            return Err(Report::new(KernelError::Conflict).attach_printable(format!(
                "book {} already has an open borrow",
                borrow.book_id().as_ref()
            )));
        }
        store.borrows.insert(*borrow.id().as_ref(), borrow.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        borrow: &Borrow,
    ) -> error_stack::Result<(), KernelError> {
        match con.store_mut().borrows.get_mut(borrow.id().as_ref()) {
            Some(stored) if stored.is_open() => {
                *stored = borrow.clone();
                Ok(())
            }
            _ => Err(Report::new(KernelError::NotFound).attach_printable(format!(
                "borrow {} is not open",
                borrow.id().as_ref()
            ))),
        }
    }
}
