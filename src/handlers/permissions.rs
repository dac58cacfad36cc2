// src/handlers/permissions.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::{context::RequestContext, error::ApiError},
    config::AppState,
    middleware::i18n::Locale,
};

// GET /api/permissions/me
#[utoipa::path(
    get,
    path = "/api/permissions/me",
    tag = "Permissions",
    responses(
        (status = 200, description = "Mapa recurso → ações do ator atual (vazio sem token)")
    ),
    security(("api_jwt" = []))
)]
pub async fn my_permissions(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: RequestContext,
) -> Result<impl IntoResponse, ApiError> {
    let permissions = app_state
        .permission_service
        .resolve(&ctx)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(permissions)))
}
