use std::process::{ExitCode, Termination};

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use error_stack::Report;
use serde::Serialize;

use kernel::KernelError;

const INTERNAL_MESSAGE: &str = "Internal server error.";

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

/// `{message, code}` envelope shared by every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    message: String,
    code: u16,
}

impl ErrorBody {
    pub fn respond(status: StatusCode, message: impl Into<String>) -> Response {
        let body = ErrorBody {
            message: message.into(),
            code: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

impl From<JsonRejection> for ErrorStatus {
    fn from(rejection: JsonRejection) -> Self {
        ErrorStatus(Report::new(KernelError::Validation).attach_printable(rejection.body_text()))
    }
}

impl From<PathRejection> for ErrorStatus {
    fn from(rejection: PathRejection) -> Self {
        ErrorStatus(Report::new(KernelError::Validation).attach_printable(rejection.body_text()))
    }
}

impl ErrorStatus {
    fn status(&self) -> StatusCode {
        match self.0.current_context() {
            KernelError::NotFound => StatusCode::NOT_FOUND,
            KernelError::Conflict | KernelError::Validation => StatusCode::BAD_REQUEST,
            KernelError::Concurrency => StatusCode::CONFLICT,
            KernelError::Timeout => StatusCode::REQUEST_TIMEOUT,
            KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The most recent printable attachment, which is the one the service layer wrote.
    fn message(&self) -> String {
        self.0
            .frames()
            .find_map(|frame| {
                frame
                    .downcast_ref::<&'static str>()
                    .map(|message| message.to_string())
                    .or_else(|| frame.downcast_ref::<String>().cloned())
            })
            .unwrap_or_else(|| self.0.current_context().to_string())
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{:?}", self.0);
            return ErrorBody::respond(status, INTERNAL_MESSAGE);
        }
        let message = self.message();
        tracing::warn!(status = status.as_u16(), %message, "request rejected");
        ErrorBody::respond(status, message)
    }
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use error_stack::Report;

    use kernel::KernelError;

    use super::ErrorStatus;

    #[test]
    fn status_follows_context() {
        let cases = [
            (KernelError::NotFound, StatusCode::NOT_FOUND),
            (KernelError::Conflict, StatusCode::BAD_REQUEST),
            (KernelError::Validation, StatusCode::BAD_REQUEST),
            (KernelError::Concurrency, StatusCode::CONFLICT),
            (KernelError::Timeout, StatusCode::REQUEST_TIMEOUT),
            (KernelError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (context, status) in cases {
            let response = ErrorStatus::from(Report::new(context)).into_response();
            assert_eq!(response.status(), status);
        }
    }

    #[test]
    fn latest_attachment_wins() {
        let report = Report::new(KernelError::Conflict)
            .attach_printable(String::from("store detail"))
            .attach_printable("Book is already borrowed.");
        assert_eq!(ErrorStatus::from(report).message(), "Book is already borrowed.");
    }
}
