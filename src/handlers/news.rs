// src/handlers/news.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::{
    common::{
        context::RequestContext,
        error::ApiError,
        i18n::{message, MessageKey},
        notification::Notification,
    },
    config::AppState,
    middleware::{
        extract::{AppJson, AppQuery},
        i18n::Locale,
        rbac::{PermNewsCreate, PermNewsDelete, PermNewsEdit, RequirePermission},
    },
    models::{
        news::{
            CreateNewsPayload, DateSelection, LoanNewsSummaryRequest, News, NewsListQuery, NewsTypeConfig,
            SkipPreview, UpdateNewsPayload,
        },
        rbac::Resource,
        view::{Paginated, TableRow},
    },
    services::news_service::checked_preview,
};

// GET /api/news/form-config
#[utoipa::path(
    get,
    path = "/api/news/form-config",
    tag = "News",
    responses(
        (status = 200, description = "Categorias aceitas por tipo", body = Vec<NewsTypeConfig>)
    )
)]
pub async fn form_config(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.news_service.form_config())
}

// POST /api/news/preview
#[utoipa::path(
    post,
    path = "/api/news/preview",
    tag = "News",
    request_body = DateSelection,
    responses(
        (status = 200, description = "Datas que a novedad vai pular", body = SkipPreview),
        (status = 400, description = "Seleção malformada ou maior que 366 dias")
    )
)]
pub async fn preview(locale: Locale, AppJson(selection): AppJson<DateSelection>) -> Result<impl IntoResponse, ApiError> {
    let preview = checked_preview(&selection).map_err(|app_err| app_err.to_api_error(&locale))?;
    Ok(Json(preview))
}

// GET /api/news
#[utoipa::path(
    get,
    path = "/api/news",
    tag = "News",
    params(NewsListQuery),
    responses(
        (status = 200, description = "Página de novedades; cada linha traz `actions`", body = Paginated<TableRow<News>>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_news(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: RequestContext,
    AppQuery(query): AppQuery<NewsListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = app_state
        .news_service
        .list(&ctx, &query)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    let permissions = app_state.permission_service.resolve_or_empty(&ctx).await;
    let rows = page.map(|news| TableRow::gate(news, &permissions, Resource::News));

    Ok((StatusCode::OK, Json(rows)))
}

// GET /api/news/{id}
#[utoipa::path(
    get,
    path = "/api/news/{id}",
    tag = "News",
    params(("id" = String, Path, description = "ID da novedad")),
    responses(
        (status = 200, description = "Novedad", body = News),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_news(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let news = app_state
        .news_service
        .get(&ctx, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(news)))
}

// POST /api/news
#[utoipa::path(
    post,
    path = "/api/news",
    tag = "News",
    request_body = CreateNewsPayload,
    responses(
        (status = 201, description = "Novedad criada", body = News),
        (status = 400, description = "Formulário inválido; nada foi enviado à API remota"),
        (status = 403, description = "Falta NEWS:CREATE")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_news(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: RequestContext,
    _perm: RequirePermission<PermNewsCreate>,
    AppJson(payload): AppJson<CreateNewsPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let news = app_state
        .news_service
        .create(&ctx, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    let notification = Notification::success(message(MessageKey::NewsCreated, &locale));
    Ok((StatusCode::CREATED, Json(json!({ "news": news, "notification": notification }))))
}

// PATCH /api/news/{id}
#[utoipa::path(
    patch,
    path = "/api/news/{id}",
    tag = "News",
    params(("id" = String, Path, description = "ID da novedad")),
    request_body = UpdateNewsPayload,
    responses(
        (status = 200, description = "Novedad atualizada", body = News),
        (status = 400, description = "Formulário inválido"),
        (status = 403, description = "Falta NEWS:EDIT")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_news(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: RequestContext,
    _perm: RequirePermission<PermNewsEdit>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateNewsPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let news = app_state
        .news_service
        .update(&ctx, &id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    let notification = Notification::success(message(MessageKey::NewsUpdated, &locale));
    Ok((StatusCode::OK, Json(json!({ "news": news, "notification": notification }))))
}

// DELETE /api/news/{id}
#[utoipa::path(
    delete,
    path = "/api/news/{id}",
    tag = "News",
    params(("id" = String, Path, description = "ID da novedad")),
    responses(
        (status = 200, description = "Novedad removida", body = Notification),
        (status = 403, description = "Falta NEWS:DELETE")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_news(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: RequestContext,
    _perm: RequirePermission<PermNewsDelete>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .news_service
        .delete(&ctx, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    let notification = Notification::success(message(MessageKey::NewsDeleted, &locale));
    Ok((StatusCode::OK, Json(json!({ "notification": notification }))))
}

// GET /api/news/loan/{loanId}/active
#[utoipa::path(
    get,
    path = "/api/news/loan/{loanId}/active",
    tag = "News",
    params(("loanId" = String, Path, description = "ID do contrato")),
    responses((status = 200, description = "Novedades ativas do contrato", body = Vec<News>)),
    security(("api_jwt" = []))
)]
pub async fn active_for_loan(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: RequestContext,
    Path(loan_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let news = app_state
        .news_service
        .active_for_loan(&ctx, &loan_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(news)))
}

// GET /api/news/loan/{loanId}
#[utoipa::path(
    get,
    path = "/api/news/loan/{loanId}",
    tag = "News",
    params(("loanId" = String, Path, description = "ID do contrato")),
    responses((status = 200, description = "Todas as novedades do contrato", body = Vec<News>)),
    security(("api_jwt" = []))
)]
pub async fn all_for_loan(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: RequestContext,
    Path(loan_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let news = app_state
        .news_service
        .all_for_loan(&ctx, &loan_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(news)))
}

// GET /api/news/loan/{loanId}/skipped-dates
#[utoipa::path(
    get,
    path = "/api/news/loan/{loanId}/skipped-dates",
    tag = "News",
    params(("loanId" = String, Path, description = "ID do contrato")),
    responses((status = 200, description = "Datas puladas calculadas pelo servidor")),
    security(("api_jwt" = []))
)]
pub async fn skipped_dates(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: RequestContext,
    Path(loan_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let dates = app_state
        .news_service
        .skipped_dates(&ctx, &loan_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(dates)))
}

// POST /api/news/loans/summary
#[utoipa::path(
    post,
    path = "/api/news/loans/summary",
    tag = "News",
    request_body = LoanNewsSummaryRequest,
    responses(
        (status = 200, description = "Resumo de novedades por contrato"),
        (status = 400, description = "Lista de contratos vazia")
    ),
    security(("api_jwt" = []))
)]
pub async fn loans_summary(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: RequestContext,
    AppJson(request): AppJson<LoanNewsSummaryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = app_state
        .news_service
        .loans_summary(&ctx, &request)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(summary)))
}
