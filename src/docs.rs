// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::common;
use crate::handlers;
use crate::middleware;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Health / Session ---
        handlers::health::health,
        handlers::session::get_session,
        handlers::session::switch_store,

        // --- Closing ---
        handlers::closing::get_closing_validation,

        // --- Receipts ---
        handlers::receipts::print_receipt,
        handlers::receipts::send_receipt,
        handlers::receipts::delete_installment,

        // --- News ---
        handlers::news::form_config,
        handlers::news::preview,
        handlers::news::list_news,
        handlers::news::get_news,
        handlers::news::create_news,
        handlers::news::update_news,
        handlers::news::delete_news,
        handlers::news::active_for_loan,
        handlers::news::all_for_loan,
        handlers::news::skipped_dates,
        handlers::news::loans_summary,

        // --- Audit ---
        handlers::audit::list_audit_logs,
        handlers::audit::get_audit_log,
        handlers::audit::logs_by_entity,
        handlers::audit::logs_by_actor,
        handlers::audit::audit_statistics,

        // --- Loans / Permissions ---
        handlers::loans::list_loans,
        handlers::permissions::my_permissions,
    ),
    components(
        schemas(
            // --- Common ---
            common::notification::Notification,
            common::notification::NotificationKind,

            // --- Session ---
            middleware::store::StoreContext,
            models::session::SwitchStorePayload,
            models::session::StoreSwitch,
            models::session::SessionView,

            // --- Closing ---
            models::closing::ClosingStatus,
            models::closing::MissingReason,
            models::closing::Tone,
            models::closing::StatusBanner,
            models::closing::MonetaryBreakdown,
            models::closing::ReasonBadge,
            models::closing::MissingInstallmentRow,
            models::closing::ClosingValidationView,

            // --- Receipts ---
            models::installment::Installment,
            models::installment::LoanRef,
            models::installment::ClientRef,
            models::installment::VehicleRef,
            models::installment::ReceiptPayload,
            models::installment::SendReceiptPayload,

            // --- News ---
            models::news::NewsType,
            models::news::NewsCategory,
            models::news::NewsTypeConfig,
            models::news::DateSelection,
            models::news::SkipPreview,
            models::news::CreateNewsPayload,
            models::news::UpdateNewsPayload,
            models::news::News,
            models::news::LoanNewsSummaryRequest,

            // --- Audit ---
            models::audit::AuditAction,
            models::audit::SortOrder,
            models::audit::AuditLog,
            models::audit::AuditStatistics,
            models::audit::ActorActivity,

            // --- Loans / RBAC ---
            models::loan::Loan,
            models::rbac::Resource,
            models::rbac::Action,
            models::view::RowActions,
        )
    ),
    tags(
        (name = "Health", description = "Estado do gateway"),
        (name = "Session", description = "Contexto de loja e token"),
        (name = "Closing", description = "Validação do cierre de caixa"),
        (name = "Receipts", description = "Impressão e envio de recibos de cuotas"),
        (name = "News", description = "Novedades que pulam cobranças"),
        (name = "Audit", description = "Registros de auditoria (somente leitura)"),
        (name = "Loans", description = "Contratos"),
        (name = "Permissions", description = "Conjunto de permissões do ator")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
