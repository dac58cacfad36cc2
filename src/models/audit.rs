// src/models/audit.rs

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::{common::serde_ext, middleware::store::StoreContext, remote::Query};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Login,
    Logout,
    Payment,
    Archive,
    Restore,
    Export,
    Approve,
    Reject,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "CREATE",
            AuditAction::Update => "UPDATE",
            AuditAction::Delete => "DELETE",
            AuditAction::Login => "LOGIN",
            AuditAction::Logout => "LOGOUT",
            AuditAction::Payment => "PAYMENT",
            AuditAction::Archive => "ARCHIVE",
            AuditAction::Restore => "RESTORE",
            AuditAction::Export => "EXPORT",
            AuditAction::Approve => "APPROVE",
            AuditAction::Reject => "REJECT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

// Registro de auditoria, somente leitura
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    #[serde(deserialize_with = "serde_ext::string_id::deserialize")]
    #[schema(value_type = String)]
    pub id: String,
    #[serde(deserialize_with = "serde_ext::string_id::deserialize")]
    #[schema(value_type = String)]
    pub actor_id: String,
    #[serde(default)]
    pub actor_name: Option<String>,
    pub action: AuditAction,
    // Nome da entidade afetada (ex: "Installment", "Loan")
    pub entity: String,
    #[serde(deserialize_with = "serde_ext::string_id::deserialize")]
    #[schema(value_type = String)]
    pub entity_id: String,
    #[serde(default)]
    pub old_values: Option<Value>,
    #[serde(default)]
    pub new_values: Option<Value>,
    #[serde(default)]
    pub metadata: Option<Value>,
    #[serde(default, deserialize_with = "serde_ext::optional_string_id::deserialize")]
    #[schema(value_type = Option<String>)]
    pub store_id: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct AuditLogFilter {
    // Tem prioridade sobre a loja do contexto
    pub store_id: Option<String>,
    pub actor_id: Option<String>,
    pub action: Option<AuditAction>,
    pub entity: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl AuditLogFilter {
    /// Query string da listagem. Campos vazios não entram.
    pub fn to_query(&self, store: &StoreContext) -> Query {
        let mut query = Query::new();

        let store_id = non_empty(&self.store_id).map(str::to_string).or_else(|| store.store_id().map(str::to_string));
        if let Some(id) = store_id {
            query.push(("storeId", id));
        }
        if let Some(actor) = non_empty(&self.actor_id) {
            query.push(("actorId", actor.to_string()));
        }
        if let Some(action) = self.action {
            query.push(("action", action.as_str().to_string()));
        }
        if let Some(entity) = non_empty(&self.entity) {
            query.push(("entity", entity.to_string()));
        }
        if let Some(start) = self.start_date {
            query.push(("startDate", start.to_string()));
        }
        if let Some(end) = self.end_date {
            query.push(("endDate", end.to_string()));
        }
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(sort_by) = non_empty(&self.sort_by) {
            query.push(("sortBy", sort_by.to_string()));
        }
        if let Some(order) = self.sort_order {
            query.push(("sortOrder", order.as_str().to_string()));
        }

        query
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditStatistics {
    #[serde(default)]
    pub total_logs: u64,
    #[serde(default)]
    pub by_action: BTreeMap<String, u64>,
    #[serde(default)]
    pub by_entity: BTreeMap<String, u64>,
    #[serde(default)]
    pub by_actor: Vec<ActorActivity>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActorActivity {
    #[serde(deserialize_with = "serde_ext::string_id::deserialize")]
    #[schema(value_type = String)]
    pub actor_id: String,
    #[serde(default)]
    pub actor_name: Option<String>,
    #[serde(default)]
    pub count: u64,
}
