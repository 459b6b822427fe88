use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use time::Date;
use uuid::Uuid;

use application::transfer::UserDto;

use crate::controller::Exhaust;
use crate::route::Envelope;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    user_id: Uuid,
    name: String,
    email: String,
    membership_date: Date,
}

impl From<UserDto> for UserResponse {
    fn from(value: UserDto) -> Self {
        Self {
            user_id: value.id,
            name: value.name,
            email: value.email,
            membership_date: value.membership_date,
        }
    }
}

impl IntoResponse for UserResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<UserDto> for Presenter {
    type To = Envelope<UserResponse>;
    fn emit(&self, input: UserDto) -> Self::To {
        Envelope::new(
            StatusCode::CREATED,
            "User account created successfully.",
            Some(UserResponse::from(input)),
        )
    }
}

impl Exhaust<Option<UserDto>> for Presenter {
    type To = Option<UserResponse>;
    fn emit(&self, input: Option<UserDto>) -> Self::To {
        input.map(UserResponse::from)
    }
}

impl Exhaust<Vec<UserDto>> for Presenter {
    type To = Json<Vec<UserResponse>>;
    fn emit(&self, input: Vec<UserDto>) -> Self::To {
        Json(input.into_iter().map(UserResponse::from).collect())
    }
}
