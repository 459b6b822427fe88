mod email;
mod id;
mod membership_date;
mod name;

pub use self::{email::*, id::*, membership_date::*, name::*};
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Destructure, References)]
pub struct User {
    id: UserId,
    name: UserName,
    email: UserEmail,
    membership_date: MembershipDate,
}

impl User {
    pub fn new(
        id: UserId,
        name: UserName,
        email: UserEmail,
        membership_date: MembershipDate,
    ) -> Self {
        Self {
            id,
            name,
            email,
            membership_date,
        }
    }
}
