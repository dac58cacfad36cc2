// src/common/context.rs

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::middleware::{auth::BearerToken, store::StoreContext};

/// Contexto de sessão montado uma vez por requisição e passado explicitamente
/// para cada chamada à API remota.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub token: Option<BearerToken>,
    pub store: StoreContext,
}

impl RequestContext {
    pub fn new(token: Option<BearerToken>, store: StoreContext) -> Self {
        Self { token, store }
    }

    pub fn from_parts(parts: &Parts) -> Self {
        Self::new(BearerToken::from_parts(parts), StoreContext::from_parts(parts))
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_ref().map(BearerToken::as_str)
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequestContext::from_parts(parts))
    }
}
