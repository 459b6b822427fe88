use error_stack::Report;

use kernel::interface::query::UserQuery;
use kernel::interface::update::UserModifier;
use kernel::prelude::entity::{User, UserEmail, UserId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryUserRepository;

#[async_trait::async_trait]
impl UserQuery for InMemoryUserRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        Ok(con.store().users.get(id.as_ref()).cloned())
    }

    async fn find_by_email(
        &self,
        con: &mut InMemoryTransaction,
        email: &UserEmail,
    ) -> error_stack::Result<Option<User>, KernelError> {
        let found = con
            .store()
            .users
            .values()
            .find(|user| user.email() == email)
            .cloned();
        Ok(found)
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<User>, KernelError> {
        let mut users = con.store().users.values().cloned().collect::<Vec<_>>();
        users.sort_by_key(|user| (*user.membership_date().as_ref(), *user.id().as_ref()));
        Ok(users)
    }
}

#[async_trait::async_trait]
impl UserModifier for InMemoryUserRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        user: &User,
    ) -> error_stack::Result<(), KernelError> {
        let store = con.store_mut();
        let taken = store.users.contains_key(user.id().as_ref())
            || store.users.values().any(|other| other.email() == user.email());
        if taken {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable(format!("user {:?} is already registered", user.email())));
        }
        store.users.insert(*user.id().as_ref(), user.clone());
        Ok(())
    }
}
