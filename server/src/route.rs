use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde::Serialize;

use crate::auth::authenticate;
use crate::handler::{AppDatabase, AppModule};

pub use self::{book::*, borrow::*, user::*};

mod book;
mod borrow;
mod user;

/// Registration stays public, everything else sits behind bearer auth.
pub fn routes<D: AppDatabase>(module: AppModule<D>) -> Router {
    let protected = Router::<AppModule<D>>::new()
        .route_user()
        .route_book()
        .route_borrow()
        .route_layer(middleware::from_fn_with_state(
            module.clone(),
            authenticate::<D>,
        ));
    Router::<AppModule<D>>::new()
        .route_registration()
        .merge(protected)
        .with_state(module)
}

/// `{message, data, code}` body used by the endpoints that report an outcome.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    code: u16,
    #[serde(skip)]
    status: StatusCode,
}

impl<T> Envelope<T> {
    pub fn new(status: StatusCode, message: &'static str, data: Option<T>) -> Self {
        Self {
            message,
            data,
            code: status.as_u16(),
            status,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod test {
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use driver::database::InMemoryDatabase;

    use crate::auth::BearerAuth;
    use crate::handler::AppModule;

    const TOKEN: &str = "test-token";

    fn app() -> Router {
        super::routes(AppModule::new(
            InMemoryDatabase::new(),
            BearerAuth::new([TOKEN]),
        ))
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"));
        let body = match body {
            Some(body) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn register(app: &Router, name: &str) -> String {
        let (status, body) = call(
            app,
            Method::POST,
            "/users/register/",
            Some(json!({
                "name": name,
                "email": format!("{name}@example.com"),
                "membership_date": "2024-01-01",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["code"], 201);
        body["data"]["user_id"].as_str().unwrap().to_string()
    }

    async fn create_book(app: &Router, isbn: &str) -> String {
        let (status, body) = call(
            app,
            Method::POST,
            "/books/create/",
            Some(json!({
                "title": "B1",
                "isbn": isbn,
                "published_date": "2001-09-11",
                "genre": "Fiction",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["book_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn borrow_return_scenario() {
        let app = app();
        let u1 = register(&app, "u1").await;
        let u2 = register(&app, "u2").await;
        let b1 = create_book(&app, "978000000001").await;

        let (status, body) = call(
            &app,
            Method::POST,
            &format!("/books/borrow/{u1}/{b1}/"),
            Some(json!({ "borrow_date": "2024-01-01" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Book borrowed successfully.", "code": 200 }));

        let (status, body) = call(&app, Method::GET, "/books/currently_borrowed/", None).await;
        assert_eq!(status, StatusCode::OK);
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["book_id"], b1.as_str());
        assert_eq!(data[0]["user_id"], u1.as_str());
        assert_eq!(data[0]["borrow_date"], "2024-01-01");
        assert_eq!(data[0]["return_date"], Value::Null);

        let (status, body) = call(
            &app,
            Method::POST,
            &format!("/books/borrow/{u2}/{b1}/"),
            Some(json!({ "borrow_date": "2024-01-02" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Book is already borrowed.");
        let (_, listed) = call(&app, Method::GET, "/books/currently_borrowed/", None).await;
        assert_eq!(listed["data"].as_array().unwrap().len(), 1);
        assert_eq!(listed["data"][0]["user_id"], u1.as_str());

        let (status, body) = call(
            &app,
            Method::PUT,
            &format!("/books/return/{b1}/"),
            Some(json!({ "return_date": "2024-01-10" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Book returned successfully.");
        let (_, listed) = call(&app, Method::GET, "/books/currently_borrowed/", None).await;
        assert!(listed["data"].as_array().unwrap().is_empty());

        let (status, body) = call(
            &app,
            Method::PUT,
            &format!("/books/return/{b1}/"),
            Some(json!({ "return_date": "2024-01-11" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 404);
    }

    #[tokio::test]
    async fn unknown_references_are_not_found() {
        let app = app();
        let user = register(&app, "reader").await;
        let missing = uuid::Uuid::new_v4();

        let (status, _) = call(
            &app,
            Method::POST,
            &format!("/books/borrow/{user}/{missing}/"),
            Some(json!({ "borrow_date": "2024-01-01" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = call(&app, Method::GET, &format!("/books/details/{missing}/"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = call(&app, Method::GET, &format!("/users/details/{missing}/"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_input_is_a_validation_error() {
        let app = app();
        let user = register(&app, "reader").await;
        let book = create_book(&app, "978000000002").await;

        let (status, body) = call(
            &app,
            Method::POST,
            &format!("/books/borrow/{user}/{book}/"),
            Some(json!({ "borrow_date": "not a date" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 400);

        let (status, _) = call(
            &app,
            Method::POST,
            &format!("/books/borrow/not-a-uuid/{book}/"),
            Some(json!({ "borrow_date": "2024-01-01" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn book_update_and_details() {
        let app = app();
        let book = create_book(&app, "978000000003").await;

        let (status, body) = call(
            &app,
            Method::PUT,
            &format!("/books/update/{book}/"),
            Some(json!({
                "title": "Updated Title",
                "isbn": "1011",
                "published_date": "2024-01-30",
                "genre": "Genre updated",
                "book_details": {
                    "number_of_pages": 100,
                    "publisher": "Publisher updated",
                    "language": "en",
                },
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Book details updated successfully.");
        assert_eq!(body["data"]["book_details"]["number_of_pages"], 100);

        let (status, body) = call(&app, Method::GET, &format!("/books/details/{book}/"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Updated Title");
        assert_eq!(body["book_details"]["publisher"], "Publisher updated");

        let (status, body) = call(&app, Method::GET, "/books/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, body) = call(
            &app,
            Method::PUT,
            &format!("/books/update/{}/", uuid::Uuid::new_v4()),
            Some(json!({
                "title": "Missing",
                "isbn": "1012",
                "published_date": "2024-01-30",
                "genre": "Genre",
                "book_details": {
                    "number_of_pages": 1,
                    "publisher": "Publisher",
                    "language": "en",
                },
            })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Book not found.");
        assert_eq!(body["code"], 404);
    }

    #[tokio::test]
    async fn protected_routes_require_a_token() {
        let app = app();
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/books/currently_borrowed/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/users/")
                    .header(header::AUTHORIZATION, "Bearer wrong")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
