// src/services/closing_service.rs

use crate::{
    common::{
        context::RequestContext,
        error::AppError,
        format::{format_currency, format_date},
        i18n::{message, MessageKey},
    },
    middleware::i18n::Locale,
    models::closing::{
        ClosingStatus, ClosingValidationResult, ClosingValidationView, MissingInstallment,
        MissingInstallmentRow, MissingReason, MonetaryBreakdown, ReasonBadge, StatusBanner, Tone,
    },
    remote::ClosingApi,
};

#[derive(Clone)]
pub struct ClosingService {
    api: ClosingApi,
}

impl ClosingService {
    pub fn new(api: ClosingApi) -> Self {
        Self { api }
    }

    /// Busca a validação do cierre e monta o modelo de exibição.
    pub async fn validation_view(
        &self,
        ctx: &RequestContext,
        cash_register_id: &str,
        locale: &Locale,
    ) -> Result<ClosingValidationView, AppError> {
        let result = self.api.validate(ctx, cash_register_id).await?;
        build_view(cash_register_id, result, locale)
    }
}

pub fn build_view(
    cash_register_id: &str,
    result: ClosingValidationResult,
    locale: &Locale,
) -> Result<ClosingValidationView, AppError> {
    let status: ClosingStatus = result.status.parse()?;
    let details = result.details;

    let breakdown = (!details.difference.is_zero()).then(|| MonetaryBreakdown {
        expected: format_currency(details.expected_total, locale),
        actual: format_currency(details.actual_total, locale),
        difference: format_currency(details.difference.abs(), locale),
        difference_value: details.difference,
    });

    let missing_count = details.missing_installments.len();
    let deleted_count = details.deleted_installments.len();

    // União na ordem da API: primeiro as faltantes, depois as eliminadas
    let rows = details
        .missing_installments
        .into_iter()
        .chain(details.deleted_installments)
        .map(|installment| build_row(installment, locale))
        .collect();

    Ok(ClosingValidationView {
        cash_register_id: cash_register_id.to_string(),
        is_valid: result.is_valid,
        message: result.message,
        banner: banner_for(status),
        breakdown,
        rows,
        missing_count,
        deleted_count,
    })
}

pub fn banner_for(status: ClosingStatus) -> StatusBanner {
    let (icon, tone) = match status {
        ClosingStatus::Correct => ("check-circle", Tone::Success),
        ClosingStatus::MinorDifference => ("alert-triangle", Tone::Warning),
        ClosingStatus::MajorDifference => ("x-circle", Tone::Danger),
        ClosingStatus::InstallmentDeleted => ("trash-2", Tone::Danger),
    };
    StatusBanner { status, icon, tone }
}

fn reason_badge(reason: MissingReason, locale: &Locale) -> ReasonBadge {
    match reason {
        MissingReason::RemovedFromClosing => ReasonBadge {
            reason,
            label: message(MessageKey::ReasonRemovedFromClosing, locale),
            tone: Tone::Warning,
        },
        MissingReason::Deleted => ReasonBadge {
            reason,
            label: message(MessageKey::ReasonDeleted, locale),
            tone: Tone::Danger,
        },
    }
}

fn build_row(installment: MissingInstallment, locale: &Locale) -> MissingInstallmentRow {
    let date = installment
        .deleted_at
        .or(installment.payment_date)
        .map(|d| format_date(d, locale));

    MissingInstallmentRow {
        initials: initials(&installment.client_name),
        amount: format_currency(installment.amount, locale),
        gps_amount: format_currency(installment.gps_amount, locale),
        total_amount: format_currency(installment.total_amount, locale),
        reason: reason_badge(installment.reason, locale),
        date,
        installment_id: installment.installment_id,
        loan_id: installment.loan_id,
        contract_number: installment.contract_number,
        client_name: installment.client_name,
        vehicle_plate: installment.vehicle_plate,
        deleted_by: installment.deleted_by,
    }
}

/// Primeira letra de cada palavra, em maiúscula, no máximo 2 caracteres.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}
