use std::ops::{Deref, DerefMut};

use sqlx::{PgConnection, Pool, Postgres};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    DependOnBookDetailsQuery, DependOnBookQuery, DependOnBorrowQuery, DependOnUserQuery,
};
use kernel::interface::update::{
    DependOnBookDetailsModifier, DependOnBookModifier, DependOnBorrowModifier,
    DependOnUserModifier,
};
use kernel::KernelError;

use crate::env;
use crate::error::ConvertError;

pub use self::{book::*, book_details::*, borrow::*, user::*};

mod book;
mod book_details;
mod borrow;
mod user;

static POSTGRES_URL: &str = "POSTGRES_URL";

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    /// Connects to `POSTGRES_URL` and applies pending migrations.
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL)?;
        let pool = Pool::connect(&url).await.convert_error()?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .convert_error()?;
        tracing::info!("postgres migrations applied");
        Ok(Self { pool })
    }
}

pub struct PostgresConnection(sqlx::Transaction<'static, Postgres>);

impl Deref for PostgresConnection {
    type Target = PgConnection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PostgresConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[async_trait::async_trait]
impl Transaction for PostgresConnection {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.rollback().await.convert_error()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Transaction = PostgresConnection;
    async fn transact(&self) -> error_stack::Result<PostgresConnection, KernelError> {
        let transaction = self.pool.begin().await.convert_error()?;
        Ok(PostgresConnection(transaction))
    }
}

impl DependOnUserQuery for PostgresDatabase {
    type UserQuery = PostgresUserRepository;
    fn user_query(&self) -> &Self::UserQuery {
        &PostgresUserRepository
    }
}

impl DependOnUserModifier for PostgresDatabase {
    type UserModifier = PostgresUserRepository;
    fn user_modifier(&self) -> &Self::UserModifier {
        &PostgresUserRepository
    }
}

impl DependOnBookQuery for PostgresDatabase {
    type BookQuery = PostgresBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &PostgresBookRepository
    }
}

impl DependOnBookModifier for PostgresDatabase {
    type BookModifier = PostgresBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &PostgresBookRepository
    }
}

impl DependOnBookDetailsQuery for PostgresDatabase {
    type BookDetailsQuery = PostgresBookDetailsRepository;
    fn book_details_query(&self) -> &Self::BookDetailsQuery {
        &PostgresBookDetailsRepository
    }
}

impl DependOnBookDetailsModifier for PostgresDatabase {
    type BookDetailsModifier = PostgresBookDetailsRepository;
    fn book_details_modifier(&self) -> &Self::BookDetailsModifier {
        &PostgresBookDetailsRepository
    }
}

impl DependOnBorrowQuery for PostgresDatabase {
    type BorrowQuery = PostgresBorrowRepository;
    fn borrow_query(&self) -> &Self::BorrowQuery {
        &PostgresBorrowRepository
    }
}

impl DependOnBorrowModifier for PostgresDatabase {
    type BorrowModifier = PostgresBorrowRepository;
    fn borrow_modifier(&self) -> &Self::BorrowModifier {
        &PostgresBorrowRepository
    }
}
