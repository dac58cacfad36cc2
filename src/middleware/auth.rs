// src/middleware/auth.rs

use axum::http::{header, request::Parts};
use axum_extra::extract::CookieJar;

// Nome do cookie onde o login do front-end guarda o JWT
pub const AUTH_COOKIE: &str = "authToken";

// O gateway não valida o token: só o repassa para a API remota,
// que é quem decide autenticação e autorização.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

impl BearerToken {
    pub fn from_parts(parts: &Parts) -> Option<Self> {
        let jar = CookieJar::from_headers(&parts.headers);
        if let Some(cookie) = jar.get(AUTH_COOKIE) {
            let value = cookie.value().trim();
            if !value.is_empty() {
                return Some(BearerToken(value.to_string()));
            }
        }

        // Fallback: cabeçalho Authorization enviado diretamente
        parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| BearerToken(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
