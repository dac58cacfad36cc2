// src/handlers/closing.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::{
    common::{context::RequestContext, error::ApiError},
    config::AppState,
    middleware::i18n::Locale,
    models::{closing::ClosingValidationView, view::FetchState},
};

// GET /api/closings/{cashRegisterId}/validation
#[utoipa::path(
    get,
    path = "/api/closings/{cashRegisterId}/validation",
    tag = "Closing",
    params(
        ("cashRegisterId" = String, Path, description = "ID do caixa")
    ),
    responses(
        (status = 200, description = "Estado da busca com o modelo de exibição em `data`", body = ClosingValidationView),
        (status = 502, description = "Falha de rede ou status fora do mapeamento; o corpo traz `state`")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_closing_validation(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: RequestContext,
    Path(cash_register_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let mut state: FetchState<ClosingValidationView> = FetchState::default();
    state.begin();

    let result = app_state
        .closing_service
        .validation_view(&ctx, &cash_register_id, &locale)
        .await;

    if let Some(err) = state.resolve(result) {
        return Err(err.to_api_error(&locale).with_field("state", json!(state)));
    }

    Ok((StatusCode::OK, Json(state)))
}
