//! Actor attribution extractor.
//!
//! The dashboard frontend sends the acting user's display name in the
//! `x-user-name` header; history entries record it as `user_name`. The header
//! is optional, so the extractor never rejects a request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;

/// The acting user's display name, if the request carried one.
#[derive(Debug, Clone)]
pub struct Actor(pub Option<String>);

impl Actor {
    pub fn into_inner(self) -> Option<String> {
        self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Actor {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let name = parts
            .headers
            .get("x-user-name")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Ok(Actor(name))
    }
}
