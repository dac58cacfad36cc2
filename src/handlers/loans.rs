// src/handlers/loans.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::{context::RequestContext, error::ApiError},
    config::AppState,
    middleware::{extract::AppQuery, i18n::Locale},
    models::{
        loan::{Loan, LoanFilter},
        view::{Paginated, TableRow},
    },
};

// GET /api/loans
#[utoipa::path(
    get,
    path = "/api/loans",
    tag = "Loans",
    params(LoanFilter),
    responses(
        (status = 200, description = "Página de contratos; cada linha traz `actions` (CONTRACT)", body = Paginated<TableRow<Loan>>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_loans(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: RequestContext,
    AppQuery(filter): AppQuery<LoanFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let permissions = app_state.permission_service.resolve_or_empty(&ctx).await;

    let page = app_state
        .loan_service
        .list_rows(&ctx, &filter, &permissions)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(page)))
}
