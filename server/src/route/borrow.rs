use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use uuid::Uuid;

use application::service::{BorrowBookService, GetBorrowService, ReturnBookService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppDatabase, AppModule};

use self::request::{BorrowBookRequest, ReturnBookRequest, Transformer};
use self::response::{BorrowedPresenter, Presenter, ReturnedPresenter};

mod request;
mod response;

pub trait BorrowRouter {
    fn route_borrow(self) -> Self;
}

impl<D: AppDatabase> BorrowRouter for Router<AppModule<D>> {
    fn route_borrow(self) -> Self {
        self.route(
            "/books/borrow/:user_id/:book_id/",
            post(
                |State(module): State<AppModule<D>>,
                 ids: Result<Path<(Uuid, Uuid)>, PathRejection>,
                 req: Result<Json<BorrowBookRequest>, JsonRejection>| async move {
                    let Path((user_id, book_id)) = ids?;
                    let Json(req) = req?;
                    Controller::new(Transformer, BorrowedPresenter)
                        .intake((user_id, book_id, req))
                        .handle(|dto| async move { module.database().borrow_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/books/return/:book_id/",
            put(
                |State(module): State<AppModule<D>>,
                 id: Result<Path<Uuid>, PathRejection>,
                 req: Result<Json<ReturnBookRequest>, JsonRejection>| async move {
                    let Path(book_id) = id?;
                    let Json(req) = req?;
                    Controller::new(Transformer, ReturnedPresenter)
                        .intake((book_id, req))
                        .handle(|dto| async move { module.database().return_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/books/currently_borrowed/",
            get(|State(module): State<AppModule<D>>| async move {
                Controller::new(Transformer, Presenter)
                    .bypass(|| async move { module.database().get_currently_borrowed().await })
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
    }
}
