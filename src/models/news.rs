// src/models/news.rs

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{common::serde_ext, middleware::store::StoreContext, remote::Query};

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NewsType {
    LoanSpecific,
    StoreWide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NewsCategory {
    // Próprias de um contrato
    Workshop,
    Maintenance,
    Accident,
    Theft,
    // Da loja inteira
    Holiday,
    SpecialEvent,
    SystemMaintenance,
    // Vale para os dois tipos
    Other,
}

impl NewsCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsCategory::Workshop => "WORKSHOP",
            NewsCategory::Maintenance => "MAINTENANCE",
            NewsCategory::Accident => "ACCIDENT",
            NewsCategory::Theft => "THEFT",
            NewsCategory::Holiday => "HOLIDAY",
            NewsCategory::SpecialEvent => "SPECIAL_EVENT",
            NewsCategory::SystemMaintenance => "SYSTEM_MAINTENANCE",
            NewsCategory::Other => "OTHER",
        }
    }
}

// Tabela de configuração do formulário: quais categorias cada tipo aceita
pub const NEWS_FORM_CONFIG: [(NewsType, &[NewsCategory]); 2] = [
    (
        NewsType::LoanSpecific,
        &[
            NewsCategory::Workshop,
            NewsCategory::Maintenance,
            NewsCategory::Accident,
            NewsCategory::Theft,
            NewsCategory::Other,
        ],
    ),
    (
        NewsType::StoreWide,
        &[
            NewsCategory::Holiday,
            NewsCategory::SpecialEvent,
            NewsCategory::SystemMaintenance,
            NewsCategory::Other,
        ],
    ),
];

impl NewsType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsType::LoanSpecific => "LOAN_SPECIFIC",
            NewsType::StoreWide => "STORE_WIDE",
        }
    }

    pub fn categories(&self) -> &'static [NewsCategory] {
        NEWS_FORM_CONFIG
            .iter()
            .find(|(news_type, _)| news_type == self)
            .map(|(_, categories)| *categories)
            .unwrap_or(&[])
    }

    pub fn accepts(&self, category: NewsCategory) -> bool {
        self.categories().contains(&category)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsTypeConfig {
    #[serde(rename = "type")]
    pub news_type: NewsType,
    pub categories: Vec<NewsCategory>,
    pub requires_loan: bool,
}

// --- Seleção de datas (tagged union por "mode") ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum DateSelection {
    Single {
        date: NaiveDate,
    },
    Range {
        #[serde(rename = "startDate")]
        start_date: NaiveDate,
        #[serde(rename = "endDate")]
        end_date: NaiveDate,
    },
    Multiple {
        dates: Vec<NaiveDate>,
    },
    Recurring {
        #[serde(rename = "startDate")]
        start_date: NaiveDate,
        #[serde(rename = "endDate")]
        end_date: NaiveDate,
        // "Mon", "Tue", ...
        #[schema(value_type = Vec<String>)]
        weekdays: Vec<Weekday>,
    },
}

impl DateSelection {
    pub fn mode(&self) -> &'static str {
        match self {
            DateSelection::Single { .. } => "single",
            DateSelection::Range { .. } => "range",
            DateSelection::Multiple { .. } => "multiple",
            DateSelection::Recurring { .. } => "recurring",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkipPreview {
    pub mode: &'static str,
    pub skipped_dates: Vec<NaiveDate>,
    // Dias corridos cobertos pela seleção (inclusivo nas duas pontas)
    pub range_days: i64,
    pub count: usize,
}

// --- Formulários ---

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNewsPayload {
    #[validate(length(min = 3, max = 100, code = "title_length"))]
    #[schema(example = "Vehículo en taller")]
    pub title: String,

    #[validate(length(max = 500, code = "description_length"))]
    pub description: Option<String>,

    #[serde(rename = "type")]
    pub news_type: NewsType,

    pub category: NewsCategory,

    // Obrigatório para LOAN_SPECIFIC; ignorado para STORE_WIDE
    pub loan_id: Option<String>,

    // Para STORE_WIDE, quando o contexto é a visão admin
    pub store_id: Option<String>,

    pub date_selection: DateSelection,

    #[serde(default)]
    pub auto_calculate_installments: bool,

    #[validate(range(max = 365, code = "installments_out_of_range"))]
    pub installments_to_subtract: Option<u32>,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNewsPayload {
    #[validate(length(min = 3, max = 100, code = "title_length"))]
    pub title: Option<String>,

    #[validate(length(max = 500, code = "description_length"))]
    pub description: Option<String>,

    #[serde(rename = "type")]
    pub news_type: Option<NewsType>,

    pub category: Option<NewsCategory>,

    pub date_selection: Option<DateSelection>,

    pub auto_calculate_installments: Option<bool>,

    #[validate(range(max = 365, code = "installments_out_of_range"))]
    pub installments_to_subtract: Option<u32>,

    pub is_active: Option<bool>,
}

fn default_true() -> bool {
    true
}

// Corpo enviado para a API remota (formato plano)
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsWriteRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub news_type: Option<NewsType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<NewsCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dates: Option<Vec<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring_weekdays: Option<Vec<Weekday>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_calculate_installments: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installments_to_subtract: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

// --- O que volta da API remota ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct News {
    #[serde(deserialize_with = "serde_ext::string_id::deserialize")]
    #[schema(value_type = String)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub news_type: NewsType,
    pub category: NewsCategory,
    #[serde(default, deserialize_with = "serde_ext::optional_string_id::deserialize")]
    #[schema(value_type = Option<String>)]
    pub loan_id: Option<String>,
    #[serde(default, deserialize_with = "serde_ext::optional_string_id::deserialize")]
    #[schema(value_type = Option<String>)]
    pub store_id: Option<String>,
    #[serde(default)]
    pub date_mode: Option<String>,
    #[serde(default, deserialize_with = "serde_ext::flexible_date::deserialize")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "serde_ext::flexible_date::deserialize")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub auto_calculate_installments: bool,
    #[serde(default)]
    pub installments_to_subtract: Option<u32>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct NewsListQuery {
    #[serde(rename = "type")]
    pub news_type: Option<NewsType>,
    pub category: Option<NewsCategory>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl NewsListQuery {
    pub fn to_query(&self, store: &StoreContext) -> Query {
        let mut query: Query = store.query_pair().into_iter().collect();
        if let Some(news_type) = self.news_type {
            query.push(("type", news_type.as_str().to_string()));
        }
        if let Some(category) = self.category {
            query.push(("category", category.as_str().to_string()));
        }
        if let Some(active) = self.is_active {
            query.push(("isActive", active.to_string()));
        }
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            query.push(("search", search.to_string()));
        }
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        query
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanNewsSummaryRequest {
    pub loan_ids: Vec<String>,
}
