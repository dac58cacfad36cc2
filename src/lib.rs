// src/lib.rs

use axum::{
    routing::{delete, get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod common;
pub mod config;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod remote;
pub mod services;

use crate::{config::AppState, docs::ApiDoc};

/// Router completo do gateway, com o estado já aplicado.
pub fn build_router(app_state: AppState) -> Router {
    let closing_routes = Router::new()
        .route("/{cashRegisterId}/validation", get(handlers::closing::get_closing_validation));

    let receipt_routes = Router::new()
        .route("/print", post(handlers::receipts::print_receipt))
        .route("/send", post(handlers::receipts::send_receipt));

    let news_routes = Router::new()
        .route("/", get(handlers::news::list_news).post(handlers::news::create_news))
        .route("/form-config", get(handlers::news::form_config))
        .route("/preview", post(handlers::news::preview))
        .route("/loans/summary", post(handlers::news::loans_summary))
        .route("/loan/{loanId}", get(handlers::news::all_for_loan))
        .route("/loan/{loanId}/active", get(handlers::news::active_for_loan))
        .route("/loan/{loanId}/skipped-dates", get(handlers::news::skipped_dates))
        .route(
            "/{id}",
            get(handlers::news::get_news)
                .patch(handlers::news::update_news)
                .delete(handlers::news::delete_news),
        );

    let audit_routes = Router::new()
        .route("/", get(handlers::audit::list_audit_logs))
        .route("/statistics", get(handlers::audit::audit_statistics))
        .route("/entity/{entity}/{entityId}", get(handlers::audit::logs_by_entity))
        .route("/actor/{actorId}", get(handlers::audit::logs_by_actor))
        .route("/{id}", get(handlers::audit::get_audit_log));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(handlers::health::health))
        .route("/api/session", get(handlers::session::get_session))
        .route("/api/session/store", post(handlers::session::switch_store))
        .route("/api/permissions/me", get(handlers::permissions::my_permissions))
        .route("/api/loans", get(handlers::loans::list_loans))
        .route("/api/installments/{id}", delete(handlers::receipts::delete_installment))
        .nest("/api/closings", closing_routes)
        .nest("/api/receipts", receipt_routes)
        .nest("/api/news", news_routes)
        .nest("/api/audit-logs", audit_routes)
        .with_state(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
