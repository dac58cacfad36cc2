// src/handlers/session.rs

use axum::{http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    CookieJar,
};

use crate::{
    common::{context::RequestContext, error::ApiError},
    middleware::{extract::AppJson, i18n::Locale, store::STORE_COOKIE},
    models::session::{SessionView, StoreSwitch, SwitchStorePayload},
    services::session_service,
};

// POST /api/session/store
#[utoipa::path(
    post,
    path = "/api/session/store",
    tag = "Session",
    request_body = SwitchStorePayload,
    responses(
        (status = 200, description = "Loja ativa alterada", body = StoreSwitch),
        (status = 400, description = "storeId vazio")
    )
)]
pub async fn switch_store(
    locale: Locale,
    jar: CookieJar,
    AppJson(payload): AppJson<SwitchStorePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let switch = session_service::switch_store(&payload).map_err(|e| e.to_api_error(&locale))?;

    let jar = match switch.store.store_id() {
        Some(store_id) => {
            let cookie = Cookie::build((STORE_COOKIE, store_id.to_string()))
                .path("/")
                .same_site(SameSite::Lax);
            jar.add(cookie)
        }
        None => jar.remove(Cookie::build(STORE_COOKIE).path("/")),
    };

    tracing::info!(store = ?switch.store, "Contexto de loja alterado");
    Ok((StatusCode::OK, jar, Json(switch)))
}

// GET /api/session
#[utoipa::path(
    get,
    path = "/api/session",
    tag = "Session",
    responses(
        (status = 200, description = "Contexto da sessão atual", body = SessionView)
    )
)]
pub async fn get_session(ctx: RequestContext) -> impl IntoResponse {
    Json(SessionView {
        authenticated: ctx.token.is_some(),
        store: ctx.store,
    })
}
