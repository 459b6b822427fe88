mod book;
mod book_details;
mod borrow;
mod user;

pub use self::{book::*, book_details::*, borrow::*, user::*};
