// src/handlers/audit.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::{context::RequestContext, error::ApiError},
    config::AppState,
    middleware::{extract::AppQuery, i18n::Locale},
    models::{
        audit::{AuditLog, AuditLogFilter, AuditStatistics},
        view::Paginated,
    },
};

// GET /api/audit-logs
#[utoipa::path(
    get,
    path = "/api/audit-logs",
    tag = "Audit",
    params(AuditLogFilter),
    responses((status = 200, description = "Página de registros de auditoria", body = Paginated<AuditLog>)),
    security(("api_jwt" = []))
)]
pub async fn list_audit_logs(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: RequestContext,
    AppQuery(filter): AppQuery<AuditLogFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let page = app_state
        .audit_service
        .list(&ctx, &filter)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(page)))
}

// GET /api/audit-logs/{id}
#[utoipa::path(
    get,
    path = "/api/audit-logs/{id}",
    tag = "Audit",
    params(("id" = String, Path, description = "ID do registro")),
    responses((status = 200, description = "Registro de auditoria", body = AuditLog)),
    security(("api_jwt" = []))
)]
pub async fn get_audit_log(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let log = app_state
        .audit_service
        .get(&ctx, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(log)))
}

// GET /api/audit-logs/entity/{entity}/{entityId}
#[utoipa::path(
    get,
    path = "/api/audit-logs/entity/{entity}/{entityId}",
    tag = "Audit",
    params(
        ("entity" = String, Path, description = "Nome da entidade"),
        ("entityId" = String, Path, description = "ID da entidade"),
        AuditLogFilter
    ),
    responses((status = 200, description = "Histórico da entidade", body = Paginated<AuditLog>)),
    security(("api_jwt" = []))
)]
pub async fn logs_by_entity(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: RequestContext,
    Path((entity, entity_id)): Path<(String, String)>,
    AppQuery(filter): AppQuery<AuditLogFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let page = app_state
        .audit_service
        .by_entity(&ctx, &entity, &entity_id, &filter)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(page)))
}

// GET /api/audit-logs/actor/{actorId}
#[utoipa::path(
    get,
    path = "/api/audit-logs/actor/{actorId}",
    tag = "Audit",
    params(
        ("actorId" = String, Path, description = "ID do ator"),
        AuditLogFilter
    ),
    responses((status = 200, description = "Ações do ator", body = Paginated<AuditLog>)),
    security(("api_jwt" = []))
)]
pub async fn logs_by_actor(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: RequestContext,
    Path(actor_id): Path<String>,
    AppQuery(filter): AppQuery<AuditLogFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let page = app_state
        .audit_service
        .by_actor(&ctx, &actor_id, &filter)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(page)))
}

// GET /api/audit-logs/statistics
#[utoipa::path(
    get,
    path = "/api/audit-logs/statistics",
    tag = "Audit",
    params(AuditLogFilter),
    responses((status = 200, description = "Contagens por ação, entidade e ator", body = AuditStatistics)),
    security(("api_jwt" = []))
)]
pub async fn audit_statistics(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: RequestContext,
    AppQuery(filter): AppQuery<AuditLogFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let stats = app_state
        .audit_service
        .statistics(&ctx, &filter)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(stats)))
}
