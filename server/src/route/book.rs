use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use error_stack::Report;
use uuid::Uuid;

use application::service::{CreateBookService, GetBookService, UpdateBookService};
use kernel::KernelError;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppDatabase, AppModule};

use self::request::{CreateBookRequest, GetBookRequest, Transformer, UpdateBookRequest};
use self::response::Presenter;

mod request;
mod response;

const BOOK_NOT_FOUND: &str = "Book not found.";

pub trait BookRouter {
    fn route_book(self) -> Self;
}

impl<D: AppDatabase> BookRouter for Router<AppModule<D>> {
    fn route_book(self) -> Self {
        self.route(
            "/books/",
            get(|State(module): State<AppModule<D>>| async move {
                Controller::new(Transformer, Presenter)
                    .bypass(|| async move { module.database().get_all_books().await })
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/books/create/",
            post(
                |State(module): State<AppModule<D>>,
                 req: Result<Json<CreateBookRequest>, JsonRejection>| async move {
                    let Json(req) = req?;
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move { module.database().create_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/books/details/:id/",
            get(
                |State(module): State<AppModule<D>>,
                 id: Result<Path<Uuid>, PathRejection>| async move {
                    let Path(id) = id?;
                    Controller::new(Transformer, Presenter)
                        .intake(GetBookRequest::new(id))
                        .handle(|dto| async move { module.database().get_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)?
                        .ok_or_else(|| {
                            ErrorStatus::from(
                                Report::new(KernelError::NotFound).attach_printable(BOOK_NOT_FOUND),
                            )
                        })
                },
            ),
        )
        .route(
            "/books/update/:id/",
            put(
                |State(module): State<AppModule<D>>,
                 id: Result<Path<Uuid>, PathRejection>,
                 req: Result<Json<UpdateBookRequest>, JsonRejection>| async move {
                    let Path(id) = id?;
                    let Json(req) = req?;
                    Controller::new(Transformer, Presenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.database().update_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
