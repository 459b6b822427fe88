use std::ops::Deref;
use std::sync::Arc;

use application::service::{
    BorrowBookService, CreateBookService, GetBookService, GetBorrowService, GetUserService,
    RegisterUserService, ReturnBookService, UpdateBookService,
};

use crate::auth::BearerAuth;

/// Every service the HTTP layer calls, satisfied by each storage engine.
pub trait AppDatabase:
    'static
    + Sync
    + Send
    + RegisterUserService
    + GetUserService
    + CreateBookService
    + GetBookService
    + UpdateBookService
    + BorrowBookService
    + ReturnBookService
    + GetBorrowService
{
}

impl<T> AppDatabase for T where
    T: 'static
        + Sync
        + Send
        + RegisterUserService
        + GetUserService
        + CreateBookService
        + GetBookService
        + UpdateBookService
        + BorrowBookService
        + ReturnBookService
        + GetBorrowService
{
}

pub struct AppModule<D>(Arc<Handler<D>>);

impl<D> AppModule<D> {
    pub fn new(database: D, auth: BearerAuth) -> Self {
        Self(Arc::new(Handler { database, auth }))
    }
}

impl<D> Clone for AppModule<D> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<D> Deref for AppModule<D> {
    type Target = Handler<D>;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler<D> {
    database: D,
    auth: BearerAuth,
}

impl<D> Handler<D> {
    pub fn database(&self) -> &D {
        &self.database
    }

    pub fn auth(&self) -> &BearerAuth {
        &self.auth
    }
}
