// src/models/installment.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::common::serde_ext;

// ---
// Installment (a "Cuota")
// ---
// Criada e alterada só pelo backend. Aqui ela é lida, impressa ou enviada.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    #[serde(deserialize_with = "serde_ext::string_id::deserialize")]
    #[schema(value_type = String, example = "inst-101")]
    pub id: String,

    #[schema(example = "40000")]
    pub amount: Decimal,

    // Sobretaxa do rastreador GPS
    #[serde(default)]
    #[schema(example = "10000")]
    pub gps: Decimal,

    #[serde(default, deserialize_with = "serde_ext::flexible_date::deserialize")]
    pub due_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "serde_ext::flexible_date::deserialize")]
    pub payment_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "serde_ext::flexible_date::deserialize")]
    pub late_payment_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "serde_ext::flexible_date::deserialize")]
    pub advance_payment_date: Option<NaiveDate>,

    #[serde(default)]
    pub is_late: bool,

    #[serde(default)]
    pub attachment_url: Option<String>,

    #[serde(default)]
    pub payment_method: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub loan: Option<LoanRef>,
}

// Referência ao contrato pai com os contadores agregados
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanRef {
    #[serde(default, deserialize_with = "serde_ext::optional_string_id::deserialize")]
    #[schema(value_type = Option<String>)]
    pub id: Option<String>,
    #[serde(default)]
    pub contract_number: Option<String>,
    #[serde(default)]
    pub paid_installments: u32,
    #[serde(default)]
    pub remaining_installments: u32,
    #[serde(default)]
    pub total_installments: u32,
    #[serde(default)]
    pub user: Option<ClientRef>,
    #[serde(default)]
    pub vehicle: Option<VehicleRef>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientRef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub document: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRef {
    #[serde(default)]
    pub plate: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

// ---
// Receipt (o "Recibo")
// ---
// Payload comum da impressão e do envio por mensagem
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptPayload {
    pub installment_id: String,
    pub loan_id: Option<String>,
    pub contract_number: Option<String>,
    pub client_name: String,
    pub client_document: Option<String>,
    pub vehicle_plate: Option<String>,
    pub amount: Decimal,
    pub gps: Decimal,
    pub total: Decimal,
    pub due_date: Option<NaiveDate>,
    // Preferência: data de atraso, depois adiantamento, depois pagamento
    pub last_payment_date: Option<NaiveDate>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub attachment_url: Option<String>,
    pub is_advance: bool,
    pub is_late: bool,
    pub days_ahead: f64,
    pub days_behind: f64,
    pub paid_installments: u32,
    pub remaining_installments: u32,
    pub total_installments: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageReceiptRequest<'a> {
    #[serde(flatten)]
    pub receipt: &'a ReceiptPayload,
    pub phone_number: String,
}

// O que o front-end manda para "Enviar por WhatsApp"
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendReceiptPayload {
    pub installment: Installment,

    #[validate(length(max = 20, code = "phone_too_long"))]
    #[schema(example = "300 123 4567")]
    pub phone_number: Option<String>,
}
