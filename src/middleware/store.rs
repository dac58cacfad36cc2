// src/middleware/store.rs

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};
use axum_extra::extract::CookieJar;
use serde::Serialize;
use utoipa::ToSchema;

// Cookie que o front-end usa para lembrar a loja ativa
pub const STORE_COOKIE: &str = "selectedStoreId";
// Cabeçalho alternativo para clientes que não usam cookies
const STORE_ID_HEADER: &str = "x-store-id";
// Valor do seletor que volta para a visão administrativa ("todas as lojas")
pub const ADMIN_VIEW_ID: &str = "admin-view";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum StoreContext {
    Admin,
    Store {
        #[serde(rename = "storeId")]
        store_id: String,
    },
}

impl StoreContext {
    pub fn from_parts(parts: &Parts) -> Self {
        let jar = CookieJar::from_headers(&parts.headers);
        let from_cookie = jar.get(STORE_COOKIE).map(|c| c.value().to_string());
        let from_header = || {
            parts
                .headers
                .get(STORE_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        from_cookie
            .or_else(from_header)
            .map(|id| Self::from_id(&id))
            .unwrap_or(StoreContext::Admin)
    }

    pub fn from_id(id: &str) -> Self {
        let id = id.trim();
        if id.is_empty() || id == ADMIN_VIEW_ID {
            StoreContext::Admin
        } else {
            StoreContext::Store { store_id: id.to_string() }
        }
    }

    pub fn store_id(&self) -> Option<&str> {
        match self {
            StoreContext::Admin => None,
            StoreContext::Store { store_id } => Some(store_id),
        }
    }

    /// Par `storeId=<id>` para as listagens. A visão admin não filtra por loja.
    pub fn query_pair(&self) -> Option<(&'static str, String)> {
        self.store_id().map(|id| ("storeId", id.to_string()))
    }
}

impl<S> FromRequestParts<S> for StoreContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(StoreContext::from_parts(parts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/");
        for (k, v) in headers {
            builder = builder.header(*k, *v);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn cookie_selects_store() {
        let p = parts(&[("cookie", "selectedStoreId=store-7")]);
        assert_eq!(StoreContext::from_parts(&p), StoreContext::Store { store_id: "store-7".into() });
    }

    #[test]
    fn missing_or_admin_value_is_admin_view() {
        assert_eq!(StoreContext::from_parts(&parts(&[])), StoreContext::Admin);
        let p = parts(&[("x-store-id", "admin-view")]);
        assert_eq!(StoreContext::from_parts(&p), StoreContext::Admin);
    }

    #[test]
    fn admin_view_adds_no_store_filter() {
        assert_eq!(StoreContext::Admin.query_pair(), None);
        assert_eq!(
            StoreContext::from_id("s1").query_pair(),
            Some(("storeId", "s1".to_string()))
        );
    }
}
