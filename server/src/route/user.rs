use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use error_stack::Report;
use uuid::Uuid;

use application::service::{GetUserService, RegisterUserService};
use kernel::KernelError;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppDatabase, AppModule};

use self::request::{GetUserRequest, RegisterUserRequest, Transformer};
use self::response::Presenter;

mod request;
mod response;

const USER_NOT_FOUND: &str = "User not found.";

pub trait UserRouter {
    fn route_registration(self) -> Self;
    fn route_user(self) -> Self;
}

impl<D: AppDatabase> UserRouter for Router<AppModule<D>> {
    fn route_registration(self) -> Self {
        self.route(
            "/users/register/",
            post(
                |State(module): State<AppModule<D>>,
                 req: Result<Json<RegisterUserRequest>, JsonRejection>| async move {
                    let Json(req) = req?;
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move { module.database().register_user(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }

    fn route_user(self) -> Self {
        self.route(
            "/users/",
            get(|State(module): State<AppModule<D>>| async move {
                Controller::new(Transformer, Presenter)
                    .bypass(|| async move { module.database().get_all_users().await })
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/users/details/:id/",
            get(
                |State(module): State<AppModule<D>>,
                 id: Result<Path<Uuid>, PathRejection>| async move {
                    let Path(id) = id?;
                    Controller::new(Transformer, Presenter)
                        .intake(GetUserRequest::new(id))
                        .handle(|dto| async move { module.database().get_user(dto).await })
                        .await
                        .map_err(ErrorStatus::from)?
                        .ok_or_else(|| {
                            ErrorStatus::from(
                                Report::new(KernelError::NotFound).attach_printable(USER_NOT_FOUND),
                            )
                        })
                },
            ),
        )
    }
}
