// src/common/i18n.rs

use crate::middleware::i18n::Locale;

// Chaves de todas as mensagens que o gateway devolve ao usuário.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    ValidationFailed,
    MalformedRequest,
    NetworkError,
    UpstreamError,
    UnrecognizedClosingStatus,
    Forbidden,
    MissingToken,
    InternalError,

    ReceiptSent,
    ReceiptSendFailed,
    ReceiptPrintFailed,
    InstallmentDeleted,

    NewsCreated,
    NewsUpdated,
    NewsDeleted,

    ReasonRemovedFromClosing,
    ReasonDeleted,
}

// Mensagens por campo. O código vai no `ValidationError` e é traduzido na resposta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMessage {
    StoreRequired,
    PhoneRequired,
    PhoneTooLong,
    LoanRequired,
    LoanIdsRequired,
    CategoryTypeMismatch,
    TitleLength,
    DescriptionLength,
    InstallmentsOutOfRange,
    DateRangeInverted,
    DateRangeTooLong,
    DatesRequired,
    WeekdaysRequired,
}

const FIELD_CODES: &[(FieldMessage, &str)] = &[
    (FieldMessage::StoreRequired, "store_required"),
    (FieldMessage::PhoneRequired, "phone_required"),
    (FieldMessage::PhoneTooLong, "phone_too_long"),
    (FieldMessage::LoanRequired, "loan_required"),
    (FieldMessage::LoanIdsRequired, "loan_ids_required"),
    (FieldMessage::CategoryTypeMismatch, "category_type_mismatch"),
    (FieldMessage::TitleLength, "title_length"),
    (FieldMessage::DescriptionLength, "description_length"),
    (FieldMessage::InstallmentsOutOfRange, "installments_out_of_range"),
    (FieldMessage::DateRangeInverted, "date_range_inverted"),
    (FieldMessage::DateRangeTooLong, "date_range_too_long"),
    (FieldMessage::DatesRequired, "dates_required"),
    (FieldMessage::WeekdaysRequired, "weekdays_required"),
];

impl FieldMessage {
    pub fn code(self) -> &'static str {
        FIELD_CODES
            .iter()
            .find(|(key, _)| *key == self)
            .map(|(_, code)| *code)
            .unwrap_or("invalid")
    }

    pub fn from_code(code: &str) -> Option<Self> {
        FIELD_CODES.iter().find(|(_, c)| *c == code).map(|(key, _)| *key)
    }
}

pub fn field_message(key: FieldMessage, locale: &Locale) -> &'static str {
    if locale.is_english() {
        match key {
            FieldMessage::StoreRequired => "Select a store.",
            FieldMessage::PhoneRequired => "The phone number is required.",
            FieldMessage::PhoneTooLong => "The phone number is too long.",
            FieldMessage::LoanRequired => "Select the contract for this news item.",
            FieldMessage::LoanIdsRequired => "Provide at least one contract.",
            FieldMessage::CategoryTypeMismatch => "The category does not match the news type.",
            FieldMessage::TitleLength => "The title must have between 3 and 100 characters.",
            FieldMessage::DescriptionLength => "The description cannot exceed 500 characters.",
            FieldMessage::InstallmentsOutOfRange => "Invalid number of installments.",
            FieldMessage::DateRangeInverted => "The end date cannot be before the start date.",
            FieldMessage::DateRangeTooLong => "The selection cannot cover more than 366 days.",
            FieldMessage::DatesRequired => "Select at least one date.",
            FieldMessage::WeekdaysRequired => "Select at least one weekday.",
        }
    } else {
        match key {
            FieldMessage::StoreRequired => "Selecciona una tienda.",
            FieldMessage::PhoneRequired => "El teléfono es obligatorio.",
            FieldMessage::PhoneTooLong => "El teléfono tiene demasiados caracteres.",
            FieldMessage::LoanRequired => "Selecciona el contrato de la novedad.",
            FieldMessage::LoanIdsRequired => "Debes indicar al menos un contrato.",
            FieldMessage::CategoryTypeMismatch => "La categoría no corresponde al tipo de novedad.",
            FieldMessage::TitleLength => "El título debe tener entre 3 y 100 caracteres.",
            FieldMessage::DescriptionLength => "La descripción no puede superar 500 caracteres.",
            FieldMessage::InstallmentsOutOfRange => "Cantidad de cuotas inválida.",
            FieldMessage::DateRangeInverted => "La fecha final no puede ser anterior a la inicial.",
            FieldMessage::DateRangeTooLong => "La selección no puede superar 366 días.",
            FieldMessage::DatesRequired => "Selecciona al menos una fecha.",
            FieldMessage::WeekdaysRequired => "Selecciona al menos un día de la semana.",
        }
    }
}

/// Texto da mensagem no idioma da requisição. Idiomas não suportados caem no espanhol.
pub fn message(key: MessageKey, locale: &Locale) -> &'static str {
    if locale.is_english() {
        english(key)
    } else {
        spanish(key)
    }
}

fn spanish(key: MessageKey) -> &'static str {
    match key {
        MessageKey::ValidationFailed => "Uno o más campos son inválidos.",
        MessageKey::MalformedRequest => "La solicitud tiene un formato inválido.",
        MessageKey::NetworkError => "No fue posible conectar con el servidor. Intenta de nuevo.",
        MessageKey::UpstreamError => "El servidor respondió con un error inesperado.",
        MessageKey::UnrecognizedClosingStatus => "El estado de validación del cierre no es reconocido.",
        MessageKey::Forbidden => "No tienes permiso para realizar esta acción.",
        MessageKey::MissingToken => "Tu sesión no es válida. Inicia sesión de nuevo.",
        MessageKey::InternalError => "Ocurrió un error inesperado.",
        MessageKey::ReceiptSent => "Recibo enviado por WhatsApp.",
        MessageKey::ReceiptSendFailed => "No fue posible enviar el recibo.",
        MessageKey::ReceiptPrintFailed => "No fue posible generar el recibo para imprimir.",
        MessageKey::InstallmentDeleted => "Cuota eliminada correctamente.",
        MessageKey::NewsCreated => "Novedad creada correctamente.",
        MessageKey::NewsUpdated => "Novedad actualizada correctamente.",
        MessageKey::NewsDeleted => "Novedad eliminada correctamente.",
        MessageKey::ReasonRemovedFromClosing => "Removida del cierre",
        MessageKey::ReasonDeleted => "Eliminada",
    }
}

fn english(key: MessageKey) -> &'static str {
    match key {
        MessageKey::ValidationFailed => "One or more fields are invalid.",
        MessageKey::MalformedRequest => "The request is malformed.",
        MessageKey::NetworkError => "Could not reach the server. Please try again.",
        MessageKey::UpstreamError => "The server answered with an unexpected error.",
        MessageKey::UnrecognizedClosingStatus => "The closing validation status is not recognized.",
        MessageKey::Forbidden => "You are not allowed to perform this action.",
        MessageKey::MissingToken => "Your session is not valid. Please sign in again.",
        MessageKey::InternalError => "An unexpected error occurred.",
        MessageKey::ReceiptSent => "Receipt sent via WhatsApp.",
        MessageKey::ReceiptSendFailed => "Could not send the receipt.",
        MessageKey::ReceiptPrintFailed => "Could not generate the receipt for printing.",
        MessageKey::InstallmentDeleted => "Installment deleted.",
        MessageKey::NewsCreated => "News created.",
        MessageKey::NewsUpdated => "News updated.",
        MessageKey::NewsDeleted => "News deleted.",
        MessageKey::ReasonRemovedFromClosing => "Removed from closing",
        MessageKey::ReasonDeleted => "Deleted",
    }
}
