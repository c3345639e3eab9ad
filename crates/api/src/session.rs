//! Session cookie handling.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::Response;
use common::SessionId;

use crate::error::ApiError;

/// Name of the cookie carrying the session ID.
pub const SESSION_COOKIE: &str = "inventory_session";

/// The session a request belongs to.
///
/// Requests without a usable session cookie get a fresh ID, which is
/// sent back to the browser with [`RequestSession::finish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestSession {
    pub id: SessionId,
    pub is_new: bool,
}

impl RequestSession {
    /// Reads the session cookie from request headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        match find_session_cookie(headers) {
            Some(id) => Self { id, is_new: false },
            None => Self {
                id: SessionId::new(),
                is_new: true,
            },
        }
    }

    /// The `Set-Cookie` value that pins the browser to this session.
    pub fn cookie(&self) -> String {
        format!("{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax", self.id)
    }

    /// Adds the session cookie to `response` if the browser does not have it yet.
    pub fn finish(&self, mut response: Response) -> Result<Response, ApiError> {
        if self.is_new {
            let value = HeaderValue::from_str(&self.cookie())
                .map_err(|e| ApiError::Internal(format!("invalid session cookie: {e}")))?;
            response.headers_mut().append(SET_COOKIE, value);
        }
        Ok(response)
    }
}

impl<S> FromRequestParts<S> for RequestSession
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

fn find_session_cookie(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| SessionId::parse(value))
}
