use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    DependOnBookDetailsQuery, DependOnBookQuery, DependOnBorrowQuery, DependOnUserQuery,
};
use kernel::interface::update::{
    DependOnBookDetailsModifier, DependOnBookModifier, DependOnBorrowModifier,
    DependOnUserModifier,
};
use kernel::prelude::entity::{Book, BookDetails, Borrow, User};
use kernel::KernelError;

pub use self::{book::*, book_details::*, borrow::*, user::*};

mod book;
mod book_details;
mod borrow;
mod user;

#[derive(Debug, Clone, Default)]
pub(in crate::database) struct MemoryStore {
    users: BTreeMap<Uuid, User>,
    books: BTreeMap<Uuid, Book>,
    book_details: BTreeMap<Uuid, BookDetails>,
    borrows: BTreeMap<Uuid, Borrow>,
}

/// Process-local store. Transactions are serialized: one holds the lock from
/// `transact` until it is committed or dropped.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    store: Arc<Mutex<MemoryStore>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Holds the store lock. The first write stages a copy of the store; reads go
/// to the staged copy once it exists, otherwise straight to the locked store.
pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<MemoryStore>,
    staged: Option<MemoryStore>,
}

impl InMemoryTransaction {
    pub(in crate::database) fn store(&self) -> &MemoryStore {
        self.staged.as_ref().unwrap_or(&*self.guard)
    }

    pub(in crate::database) fn store_mut(&mut self) -> &mut MemoryStore {
        let guard = &self.guard;
        self.staged.get_or_insert_with(|| (**guard).clone())
    }
}

#[async_trait::async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        let Self { mut guard, staged } = self;
        if let Some(staged) = staged {
            *guard = staged;
        }
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Transaction = InMemoryTransaction;
    async fn transact(&self) -> error_stack::Result<InMemoryTransaction, KernelError> {
        let guard = Arc::clone(&self.store).lock_owned().await;
        Ok(InMemoryTransaction {
            guard,
            staged: None,
        })
    }
}

impl DependOnUserQuery for InMemoryDatabase {
    type UserQuery = InMemoryUserRepository;
    fn user_query(&self) -> &Self::UserQuery {
        &InMemoryUserRepository
    }
}

impl DependOnUserModifier for InMemoryDatabase {
    type UserModifier = InMemoryUserRepository;
    fn user_modifier(&self) -> &Self::UserModifier {
        &InMemoryUserRepository
    }
}

impl DependOnBookQuery for InMemoryDatabase {
    type BookQuery = InMemoryBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &InMemoryBookRepository
    }
}

impl DependOnBookModifier for InMemoryDatabase {
    type BookModifier = InMemoryBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &InMemoryBookRepository
    }
}

impl DependOnBookDetailsQuery for InMemoryDatabase {
    type BookDetailsQuery = InMemoryBookDetailsRepository;
    fn book_details_query(&self) -> &Self::BookDetailsQuery {
        &InMemoryBookDetailsRepository
    }
}

impl DependOnBookDetailsModifier for InMemoryDatabase {
    type BookDetailsModifier = InMemoryBookDetailsRepository;
    fn book_details_modifier(&self) -> &Self::BookDetailsModifier {
        &InMemoryBookDetailsRepository
    }
}

impl DependOnBorrowQuery for InMemoryDatabase {
    type BorrowQuery = InMemoryBorrowRepository;
    fn borrow_query(&self) -> &Self::BorrowQuery {
        &InMemoryBorrowRepository
    }
}

impl DependOnBorrowModifier for InMemoryDatabase {
    type BorrowModifier = InMemoryBorrowRepository;
    fn borrow_modifier(&self) -> &Self::BorrowModifier {
        &InMemoryBorrowRepository
    }
}
