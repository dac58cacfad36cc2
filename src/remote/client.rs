// src/remote/client.rs

use std::time::Duration;

use anyhow::Context;
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::common::context::RequestContext;

#[derive(Debug, Error)]
pub enum RemoteError {
    // Rede, DNS, TLS ou timeout
    #[error("Falha na requisição HTTP: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API remota respondeu {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Corpo de resposta inválido: {0}")]
    Decode(String),
}

pub type Query = Vec<(&'static str, String)>;

/// Cliente único da API remota. Clonar é barato: o pool de conexões é compartilhado.
#[derive(Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RemoteClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url).with_context(|| format!("API_BASE_URL inválida: {}", base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("API_BASE_URL não pode ser usada como base: {}", base_url);
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Falha ao montar o cliente HTTP")?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Monta a URL a partir de segmentos; cada um é codificado separadamente.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // A barra final da base (se houver) é descartada antes dos segmentos
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, ctx: &RequestContext, segments: &[&str]) -> RequestBuilder {
        let url = self.url(segments);
        tracing::debug!(method = %method, path = %url.path(), "Chamada à API remota");

        let builder = self.http.request(method, url);
        match ctx.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        segments: &[&str],
        query: &Query,
    ) -> Result<T, RemoteError> {
        let response = self.request(Method::GET, ctx, segments).query(query).send().await?;
        parse_json(response).await
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        segments: &[&str],
        body: &B,
    ) -> Result<T, RemoteError> {
        let response = self.request(Method::POST, ctx, segments).json(body).send().await?;
        parse_json(response).await
    }

    /// POST cujo corpo de resposta não interessa.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        ctx: &RequestContext,
        segments: &[&str],
        body: &B,
    ) -> Result<(), RemoteError> {
        let response = self.request(Method::POST, ctx, segments).json(body).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    pub async fn patch_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        segments: &[&str],
        body: &B,
    ) -> Result<T, RemoteError> {
        let response = self.request(Method::PATCH, ctx, segments).json(body).send().await?;
        parse_json(response).await
    }

    pub async fn delete(&self, ctx: &RequestContext, segments: &[&str]) -> Result<(), RemoteError> {
        let response = self.request(Method::DELETE, ctx, segments).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    /// POST que devolve um binário (o PDF do recibo).
    pub async fn post_for_bytes<B: Serialize + ?Sized>(
        &self,
        ctx: &RequestContext,
        segments: &[&str],
        body: &B,
    ) -> Result<Vec<u8>, RemoteError> {
        let response = self.request(Method::POST, ctx, segments).json(body).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

async fn ensure_success(response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = upstream_message(&body)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Erro desconhecido").to_string());

    Err(RemoteError::Status { status: status.as_u16(), message })
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
    let response = ensure_success(response).await?;
    let path = response.url().path().to_string();
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| RemoteError::Decode(format!("{}: {}", path, e)))
}

/// Extrai a mensagem legível de um corpo de erro: `message` (texto ou lista), depois `error`,
/// depois o texto bruto.
pub fn upstream_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return Some(body.to_string());
    };

    let from_field = |field: &str| match json.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Array(items)) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        _ => None,
    };

    from_field("message")
        .or_else(|| from_field("error"))
        .or_else(|| Some(body.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::store::StoreContext;

    #[test]
    fn message_field_wins_over_error() {
        let body = r#"{"statusCode":409,"message":"La cuota ya fue pagada","error":"Conflict"}"#;
        assert_eq!(upstream_message(body).as_deref(), Some("La cuota ya fue pagada"));
    }

    #[test]
    fn message_list_is_joined() {
        let body = r#"{"message":["title too short","loanId required"]}"#;
        assert_eq!(upstream_message(body).as_deref(), Some("title too short, loanId required"));
    }

    #[test]
    fn non_json_body_is_used_verbatim() {
        assert_eq!(upstream_message("Bad Gateway").as_deref(), Some("Bad Gateway"));
        assert_eq!(upstream_message("   "), None);
    }

    #[test]
    fn segments_are_appended_to_base_path() {
        let client = RemoteClient::new("http://api.local/backend/", Duration::from_secs(1)).unwrap();
        let url = client.url(&["api", "v1", "news", "a b"]);
        assert_eq!(url.as_str(), "http://api.local/backend/api/v1/news/a%20b");

        let root = RemoteClient::new("http://api.local", Duration::from_secs(1)).unwrap();
        assert_eq!(root.url(&["closing", "validate", "7"]).as_str(), "http://api.local/closing/validate/7");
    }

    #[test]
    fn invalid_base_url_fails_start_up() {
        assert!(RemoteClient::new("not a url", Duration::from_secs(1)).is_err());
        assert!(RemoteClient::new("mailto:ops@example.com", Duration::from_secs(1)).is_err());
    }

    #[test]
    fn request_without_token_has_no_authorization() {
        let client = RemoteClient::new("http://api.local", Duration::from_secs(1)).unwrap();
        let ctx = RequestContext::new(None, StoreContext::Admin);
        let request = client.request(Method::GET, &ctx, &["x"]).build().unwrap();
        assert!(request.headers().get("authorization").is_none());
    }
}
