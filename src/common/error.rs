// src/common/error.rs

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

use crate::{
    common::i18n::{field_message, message, FieldMessage, MessageKey},
    common::notification::Notification,
    middleware::i18n::Locale,
    models::rbac::{Action, Resource},
    remote::RemoteError,
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] ValidationErrors),

    // Corpo ou query que não desserializa no tipo esperado
    #[error("Requisição malformada: {0}")]
    MalformedRequest(String),

    // Rejeição de regra de negócio vinda da API remota (4xx) ou falha dela (5xx)
    #[error("API remota respondeu {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Falha de rede: {0}")]
    Network(String),

    #[error("Resposta inválida da API remota: {0}")]
    InvalidUpstreamResponse(String),

    #[error("Status de validação de cierre desconhecido: {0}")]
    UnrecognizedClosingStatus(String),

    #[error("Permissão ausente: {resource}:{action}")]
    Forbidden { resource: Resource, action: Action },

    #[error("Token de autenticação ausente")]
    MissingToken,

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl From<RemoteError> for AppError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Transport(e) => AppError::Network(e.to_string()),
            RemoteError::Status { status, message } => AppError::Upstream { status, message },
            RemoteError::Decode(detail) => AppError::InvalidUpstreamResponse(detail),
        }
    }
}

impl AppError {
    /// Monta um erro de validação para um único campo, fora do `#[derive(Validate)]`.
    pub fn invalid_field(field: &'static str, key: FieldMessage) -> Self {
        let error = ValidationError::new(key.code());
        let mut errors = ValidationErrors::new();
        errors.add(field, error);
        AppError::ValidationError(errors)
    }

    /// Converte o erro no corpo localizado que o front-end mostra como notificação.
    pub fn to_api_error(self, locale: &Locale) -> ApiError {
        match self {
            AppError::ValidationError(errors) => {
                let mut details: HashMap<String, Vec<String>> = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages = field_errors.iter().map(|e| localized_field_error(e, locale)).collect();
                    // As chaves seguem o nome do campo no JSON, não o da struct
                    details.insert(camel_case(&field), messages);
                }
                ApiError::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message(MessageKey::ValidationFailed, locale))
                    .with_details(json!(details))
            }
            AppError::MalformedRequest(detail) => {
                tracing::warn!("Requisição rejeitada na desserialização: {}", detail);
                ApiError::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message(MessageKey::MalformedRequest, locale))
            }
            AppError::Upstream { status, message: upstream_message } if (400..500).contains(&status) => {
                tracing::warn!(status, "Rejeição da API remota: {}", upstream_message);
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_REQUEST);
                ApiError::new(status, "UPSTREAM_REJECTED", &upstream_message)
            }
            AppError::Upstream { status, message: upstream_message } => {
                tracing::error!(status, "Falha da API remota: {}", upstream_message);
                ApiError::new(StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", message(MessageKey::UpstreamError, locale))
            }
            AppError::Network(detail) => {
                tracing::error!("Falha de rede ao chamar a API remota: {}", detail);
                ApiError::new(StatusCode::BAD_GATEWAY, "NETWORK_ERROR", message(MessageKey::NetworkError, locale))
            }
            AppError::InvalidUpstreamResponse(detail) => {
                tracing::error!("Resposta inválida da API remota: {}", detail);
                ApiError::new(StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", message(MessageKey::UpstreamError, locale))
            }
            AppError::UnrecognizedClosingStatus(status) => {
                tracing::error!(status = %status, "Status de cierre fora do mapeamento");
                ApiError::new(
                    StatusCode::BAD_GATEWAY,
                    "UNRECOGNIZED_CLOSING_STATUS",
                    message(MessageKey::UnrecognizedClosingStatus, locale),
                )
                .with_details(json!({ "status": status }))
            }
            AppError::Forbidden { resource, action } => {
                ApiError::new(StatusCode::FORBIDDEN, "FORBIDDEN", message(MessageKey::Forbidden, locale))
                    .with_details(json!({ "resource": resource, "action": action }))
            }
            AppError::MissingToken => {
                ApiError::new(StatusCode::UNAUTHORIZED, "MISSING_TOKEN", message(MessageKey::MissingToken, locale))
            }
            ref e @ AppError::InternalServerError(_) => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message(MessageKey::InternalError, locale))
            }
        }
    }
}

fn localized_field_error(error: &ValidationError, locale: &Locale) -> String {
    match FieldMessage::from_code(&error.code) {
        Some(key) => field_message(key, locale).to_string(),
        None => error
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| error.code.to_string()),
    }
}

// "installments_to_subtract" -> "installmentsToSubtract"
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default()).into_response()
    }
}

// ---
// ApiError: o corpo de erro que sai do gateway
// ---
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub error: String,
    pub details: Option<Value>,
    pub extra: Map<String, Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, error: &str) -> Self {
        Self {
            status,
            code,
            error: error.to_string(),
            details: None,
            extra: Map::new(),
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Campo adicional no nível raiz do corpo (ex: o `state` da validação de cierre).
    pub fn with_field(mut self, key: &str, value: Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = self.extra;
        body.insert("error".into(), json!(self.error));
        body.insert("code".into(), json!(self.code));
        if let Some(details) = self.details {
            body.insert("details".into(), details);
        }
        body.insert("notification".into(), json!(Notification::error(&self.error)));

        (self.status, Json(Value::Object(body))).into_response()
    }
}
