// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

const DEFAULT_LANG: &str = "es";
const SUPPORTED_LANGS: [&str; 2] = ["es", "en"];

// Extrator de idioma: primeira tag do Accept-Language, reduzida ao idioma principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(pub String);

impl Locale {
    /// "pt-BR" -> "pt" -> não suportado -> "es"
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag.split('-').next().unwrap_or(tag).to_ascii_lowercase();
        if SUPPORTED_LANGS.contains(&primary.as_str()) {
            Locale(primary)
        } else {
            Locale(DEFAULT_LANG.to_string())
        }
    }

    pub fn is_english(&self) -> bool {
        self.0 == "en"
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale(DEFAULT_LANG.to_string())
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

impl Locale {
    // Versão síncrona, usada também por outros extratores (ex: RequirePermission)
    pub fn from_parts(parts: &Parts) -> Self {
        parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .and_then(|header_str| {
                accept_language::parse(header_str)
                    .first()
                    .map(|tag| Locale::from_tag(tag))
            })
            .unwrap_or_default()
    }
}
