// src/handlers/receipts.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::{headers::UserAgent, TypedHeader};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::{
        context::RequestContext,
        error::{ApiError, AppError},
        i18n::{message, MessageKey},
        notification::Notification,
    },
    config::AppState,
    middleware::{
        extract::{AppJson, AppQuery},
        i18n::Locale,
        rbac::{PermInstallmentDelete, RequirePermission},
    },
    models::installment::{Installment, SendReceiptPayload},
    services::document_opener::{ClientPlatform, OpenedDocument},
};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct PrintQuery {
    // O front-end avisa quando o navegador bloqueou a janela nova
    #[serde(default)]
    pub popup_blocked: bool,
}

// POST /api/receipts/print
#[utoipa::path(
    post,
    path = "/api/receipts/print",
    tag = "Receipts",
    request_body = Installment,
    params(PrintQuery),
    responses(
        (status = 200, description = "PDF do recibo; `x-print-mode` indica hidden-frame, new-window ou download"),
        (status = 502, description = "Falha ao gerar o recibo")
    ),
    security(("api_jwt" = []))
)]
pub async fn print_receipt(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: RequestContext,
    user_agent: Option<TypedHeader<UserAgent>>,
    AppQuery(query): AppQuery<PrintQuery>,
    AppJson(installment): AppJson<Installment>,
) -> Result<OpenedDocument, ApiError> {
    let platform = ClientPlatform::from_user_agent(user_agent.as_ref().map(|TypedHeader(ua)| ua.as_str()));
    let today = Local::now().date_naive();

    app_state
        .receipt_service
        .print(&ctx, &installment, today, platform, query.popup_blocked)
        .await
        .map_err(|app_err| {
            let mut api_error = app_err.to_api_error(&locale);
            // Rejeições 4xx mantêm a mensagem do servidor
            if api_error.status.is_server_error() {
                api_error.error = message(MessageKey::ReceiptPrintFailed, &locale).to_string();
            }
            api_error
        })
}

// POST /api/receipts/send
#[utoipa::path(
    post,
    path = "/api/receipts/send",
    tag = "Receipts",
    request_body = SendReceiptPayload,
    responses(
        (status = 200, description = "Recibo enviado", body = Notification),
        (status = 400, description = "Telefone ausente ou inválido"),
        (status = 502, description = "A API remota não enviou o recibo", body = Notification)
    ),
    security(("api_jwt" = []))
)]
pub async fn send_receipt(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: RequestContext,
    AppJson(payload): AppJson<SendReceiptPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let today = Local::now().date_naive();
    let notification = app_state
        .receipt_service
        .send_by_message(&ctx, &payload.installment, payload.phone_number.as_deref(), today, &locale)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    let status = if notification.is_success() { StatusCode::OK } else { StatusCode::BAD_GATEWAY };
    Ok((status, Json(json!({ "notification": notification }))))
}

// DELETE /api/installments/{id}
#[utoipa::path(
    delete,
    path = "/api/installments/{id}",
    tag = "Receipts",
    params(
        ("id" = String, Path, description = "ID da cuota")
    ),
    responses(
        (status = 200, description = "Cuota removida", body = Notification),
        (status = 403, description = "Falta INSTALLMENT:DELETE")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_installment(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: RequestContext,
    _perm: RequirePermission<PermInstallmentDelete>,
    Path(installment_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .installment_service
        .delete(&ctx, &installment_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    let notification = Notification::success(message(MessageKey::InstallmentDeleted, &locale));
    Ok((StatusCode::OK, Json(json!({ "notification": notification }))))
}
