use serde::Deserialize;
use time::Date;
use uuid::Uuid;

use application::transfer::{GetUserDto, RegisterUserDto};

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    name: String,
    email: String,
    membership_date: Date,
}

#[derive(Debug)]
pub struct GetUserRequest {
    id: Uuid,
}

impl GetUserRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct Transformer;

impl Intake<RegisterUserRequest> for Transformer {
    type To = RegisterUserDto;
    fn emit(&self, input: RegisterUserRequest) -> Self::To {
        RegisterUserDto {
            name: input.name,
            email: input.email,
            membership_date: input.membership_date,
        }
    }
}

impl Intake<GetUserRequest> for Transformer {
    type To = GetUserDto;
    fn emit(&self, input: GetUserRequest) -> Self::To {
        GetUserDto { id: input.id }
    }
}
