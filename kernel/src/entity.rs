mod book;
mod book_details;
mod borrow;
mod common;
mod user;

pub use self::{book::*, book_details::*, borrow::*, common::*, user::*};
