use time::Date;
use uuid::Uuid;

use kernel::prelude::entity::{DestructUser, User};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub membership_date: Date,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let DestructUser {
            id,
            name,
            email,
            membership_date,
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            membership_date: membership_date.into(),
        }
    }
}

pub struct GetUserDto {
    pub id: Uuid,
}

pub struct RegisterUserDto {
    pub name: String,
    pub email: String,
    pub membership_date: Date,
}
