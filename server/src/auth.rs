use std::collections::HashSet;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;

use crate::error::ErrorBody;
use crate::handler::AppModule;

static API_TOKENS: &str = "API_TOKENS";

const UNAUTHORIZED: &str = "Authentication credentials were not provided or are invalid.";

/// Accepted bearer tokens. Issuing them happens elsewhere.
#[derive(Debug, Clone, Default)]
pub struct BearerAuth {
    tokens: HashSet<String>,
}

impl BearerAuth {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Reads the comma-separated `API_TOKENS` list.
    pub fn from_env() -> Self {
        let raw = dotenvy::var(API_TOKENS).unwrap_or_default();
        let auth = Self::new(
            raw.split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty()),
        );
        if auth.tokens.is_empty() {
            tracing::warn!("{API_TOKENS} is empty, every protected route will answer 401");
        }
        auth
    }

    pub fn verify(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }
}

pub async fn authenticate<D: 'static + Sync + Send>(
    State(module): State<AppModule<D>>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    request: Request,
    next: Next,
) -> Response {
    match bearer {
        Some(TypedHeader(Authorization(bearer))) if module.auth().verify(bearer.token()) => {
            next.run(request).await
        }
        _ => {
            tracing::warn!(path = %request.uri().path(), "rejected unauthenticated request");
            ErrorBody::respond(StatusCode::UNAUTHORIZED, UNAUTHORIZED)
        }
    }
}

#[cfg(test)]
mod test {
    use super::BearerAuth;

    #[test]
    fn verify_matches_configured_tokens_only() {
        let auth = BearerAuth::new(["alpha", "beta"]);
        assert!(auth.verify("alpha"));
        assert!(auth.verify("beta"));
        assert!(!auth.verify("gamma"));
        assert!(!auth.verify(""));
        assert!(!BearerAuth::default().verify("alpha"));
    }
}
