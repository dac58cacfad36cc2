// src/models/closing.rs

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::common::{error::AppError, serde_ext};

// --- Enums ---

// Classificação calculada no servidor. O gateway só mapeia, nunca recalcula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClosingStatus {
    Correct,
    MinorDifference,
    MajorDifference,
    InstallmentDeleted,
}

impl FromStr for ClosingStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CORRECT" => Ok(ClosingStatus::Correct),
            "MINOR_DIFFERENCE" => Ok(ClosingStatus::MinorDifference),
            "MAJOR_DIFFERENCE" => Ok(ClosingStatus::MajorDifference),
            "INSTALLMENT_DELETED" => Ok(ClosingStatus::InstallmentDeleted),
            other => Err(AppError::UnrecognizedClosingStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MissingReason {
    RemovedFromClosing,
    Deleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Warning,
    Danger,
}

// --- O que vem de GET /closing/validate/{cashRegisterId} ---

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosingValidationResult {
    pub is_valid: bool,
    // Texto cru: um valor fora do mapeamento é erro, não cai num default
    pub status: String,
    #[serde(default)]
    pub message: String,
    pub details: ClosingValidationDetails,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosingValidationDetails {
    pub expected_total: Decimal,
    pub actual_total: Decimal,
    // expectedTotal − actualTotal, como enviado pelo servidor
    pub difference: Decimal,
    #[serde(default)]
    pub missing_installments: Vec<MissingInstallment>,
    #[serde(default)]
    pub deleted_installments: Vec<MissingInstallment>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingInstallment {
    #[serde(deserialize_with = "serde_ext::string_id::deserialize")]
    pub installment_id: String,
    #[serde(default, deserialize_with = "serde_ext::optional_string_id::deserialize")]
    pub loan_id: Option<String>,
    #[serde(default)]
    pub contract_number: Option<String>,
    #[serde(default)]
    pub client_name: String,
    #[serde(default, deserialize_with = "serde_ext::optional_string_id::deserialize")]
    pub client_id: Option<String>,
    #[serde(default)]
    pub vehicle_plate: Option<String>,
    #[serde(default)]
    pub amount: Decimal,
    #[serde(default)]
    pub gps_amount: Decimal,
    #[serde(default)]
    pub total_amount: Decimal,
    pub reason: MissingReason,
    #[serde(default, deserialize_with = "serde_ext::flexible_date::deserialize")]
    pub payment_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "serde_ext::flexible_date::deserialize")]
    pub deleted_at: Option<NaiveDate>,
    #[serde(default)]
    pub deleted_by: Option<String>,
}

// --- O modelo de exibição montado pelo gateway ---

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusBanner {
    pub status: ClosingStatus,
    #[schema(example = "check-circle")]
    pub icon: &'static str,
    pub tone: Tone,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonetaryBreakdown {
    #[schema(example = "$ 1.500.000,00")]
    pub expected: String,
    pub actual: String,
    // Valor absoluto formatado
    pub difference: String,
    // Diferença com sinal, exatamente como enviada
    pub difference_value: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReasonBadge {
    pub reason: MissingReason,
    pub label: &'static str,
    pub tone: Tone,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MissingInstallmentRow {
    pub installment_id: String,
    pub loan_id: Option<String>,
    pub contract_number: Option<String>,
    pub client_name: String,
    #[schema(example = "JP")]
    pub initials: String,
    pub vehicle_plate: Option<String>,
    pub amount: String,
    pub gps_amount: String,
    pub total_amount: String,
    pub reason: ReasonBadge,
    #[schema(example = "28/05/2024")]
    pub date: Option<String>,
    pub deleted_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClosingValidationView {
    pub cash_register_id: String,
    pub is_valid: bool,
    pub message: String,
    pub banner: StatusBanner,
    // Presente só quando difference ≠ 0
    pub breakdown: Option<MonetaryBreakdown>,
    pub rows: Vec<MissingInstallmentRow>,
    pub missing_count: usize,
    pub deleted_count: usize,
}
