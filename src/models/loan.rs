// src/models/loan.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{common::serde_ext, middleware::store::StoreContext, remote::Query};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    #[serde(deserialize_with = "serde_ext::string_id::deserialize")]
    #[schema(value_type = String)]
    pub id: String,
    #[serde(default)]
    pub contract_number: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub vehicle_plate: Option<String>,
    // ACTIVE, FINISHED, DEFAULTED... o conjunto é do servidor
    pub status: String,
    pub loan_amount: Decimal,
    #[serde(default)]
    pub installment_amount: Option<Decimal>,
    #[serde(default)]
    pub paid_installments: u32,
    #[serde(default)]
    pub remaining_installments: u32,
    #[serde(default)]
    pub total_installments: u32,
    #[serde(default, deserialize_with = "serde_ext::optional_string_id::deserialize")]
    #[schema(value_type = Option<String>)]
    pub store_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct LoanFilter {
    pub status: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl LoanFilter {
    pub fn to_query(&self, store: &StoreContext) -> Query {
        let mut query: Query = store.query_pair().into_iter().collect();
        for (key, value) in [("status", &self.status), ("search", &self.search)] {
            if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                query.push((key, v.to_string()));
            }
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
