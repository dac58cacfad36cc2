// src/services/receipt_service.rs

use chrono::{NaiveDate, NaiveTime};

use crate::{
    common::{
        context::RequestContext,
        error::AppError,
        i18n::{message, FieldMessage, MessageKey},
        notification::Notification,
    },
    middleware::i18n::Locale,
    models::installment::{Installment, MessageReceiptRequest, ReceiptPayload},
    remote::ReceiptApi,
    services::document_opener::{opener_for, ClientPlatform, OpenedDocument, PrintDocument},
};

const MS_PER_DAY: f64 = 86_400_000.0;
// Tamanho de um celular local sem código de país (ex: 3001234567)
const LOCAL_PHONE_DIGITS: usize = 10;

#[derive(Clone)]
pub struct ReceiptService {
    api: ReceiptApi,
    default_country_code: String,
}

impl ReceiptService {
    pub fn new(api: ReceiptApi, default_country_code: String) -> Self {
        Self { api, default_country_code }
    }

    /// Gera o PDF na API remota e entrega pelo caminho de impressão da plataforma.
    pub async fn print(
        &self,
        ctx: &RequestContext,
        installment: &Installment,
        today: NaiveDate,
        platform: ClientPlatform,
        popup_blocked: bool,
    ) -> Result<OpenedDocument, AppError> {
        let payload = build_receipt_payload(installment, today);
        let bytes = self.api.render_pdf(ctx, &payload).await?;

        tracing::info!(installment_id = %payload.installment_id, ?platform, "Recibo gerado para impressão");

        let document = PrintDocument::receipt(&payload.installment_id, bytes);
        Ok(opener_for(platform).open(document, popup_blocked))
    }

    /// Envia o recibo pelo endpoint de mensagens. Só a falta de telefone volta como erro;
    /// falhas da API remota viram notificação de erro.
    pub async fn send_by_message(
        &self,
        ctx: &RequestContext,
        installment: &Installment,
        phone: Option<&str>,
        today: NaiveDate,
        locale: &Locale,
    ) -> Result<Notification, AppError> {
        let raw_phone = phone
            .filter(|p| !p.trim().is_empty())
            .or_else(|| installment.loan.as_ref()?.user.as_ref()?.phone.as_deref());

        let Some(phone_number) = raw_phone.and_then(|p| format_phone(p, &self.default_country_code)) else {
            tracing::warn!(installment_id = %installment.id, "Recibo sem telefone de destino");
            return Err(AppError::invalid_field("phoneNumber", FieldMessage::PhoneRequired));
        };

        let payload = build_receipt_payload(installment, today);
        let request = MessageReceiptRequest { receipt: &payload, phone_number };

        let notification = match self.api.send_message(ctx, &request).await {
            Ok(()) => {
                tracing::info!(installment_id = %payload.installment_id, "Recibo enviado por mensagem");
                Notification::success(message(MessageKey::ReceiptSent, locale))
            }
            Err(e) => {
                tracing::error!(installment_id = %payload.installment_id, "Falha ao enviar recibo: {}", e);
                Notification::error(message(MessageKey::ReceiptSendFailed, locale))
            }
        };
        Ok(notification)
    }
}

/// Deriva o payload comum do recibo a partir da cuota e do dia atual.
pub fn build_receipt_payload(installment: &Installment, today: NaiveDate) -> ReceiptPayload {
    let last_payment_date = installment
        .late_payment_date
        .or(installment.advance_payment_date)
        .or(installment.payment_date);

    let is_advance = !installment.is_late && installment.advance_payment_date.is_some();
    let is_late = installment.is_late && installment.late_payment_date.is_some();

    let days_ahead = match installment.advance_payment_date {
        Some(advance) if is_advance => day_offset(today, advance),
        _ => 0.0,
    };
    let days_behind = match installment.late_payment_date {
        Some(late) if is_late => day_offset(late, today),
        _ => 0.0,
    };

    let loan = installment.loan.clone().unwrap_or_default();
    let client = loan.user.clone().unwrap_or_default();

    ReceiptPayload {
        installment_id: installment.id.clone(),
        loan_id: loan.id,
        contract_number: loan.contract_number,
        client_name: client.name,
        client_document: client.document,
        vehicle_plate: loan.vehicle.and_then(|v| v.plate),
        amount: installment.amount,
        gps: installment.gps,
        total: installment.amount + installment.gps,
        due_date: installment.due_date,
        last_payment_date,
        payment_method: installment.payment_method.clone(),
        notes: installment.notes.clone(),
        attachment_url: installment.attachment_url.clone(),
        is_advance,
        is_late,
        days_ahead,
        days_behind,
        paid_installments: loan.paid_installments,
        remaining_installments: loan.remaining_installments,
        total_installments: loan.total_installments,
    }
}

// Diferença em dias entre duas datas truncadas à meia-noite (milissegundos / 86.400.000)
fn day_offset(from: NaiveDate, to: NaiveDate) -> f64 {
    let ms = (to.and_time(NaiveTime::MIN) - from.and_time(NaiveTime::MIN)).num_milliseconds();
    ms as f64 / MS_PER_DAY
}

/// Só dígitos, com o código de país na frente quando o número é local.
pub fn format_phone(raw: &str, country_code: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    if digits.len() == LOCAL_PHONE_DIGITS {
        Some(format!("{}{}", country_code, digits))
    } else {
        Some(digits)
    }
}
