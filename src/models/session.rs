// src/models/session.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::middleware::store::StoreContext;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwitchStorePayload {
    #[validate(length(min = 1, code = "store_required"))]
    #[schema(example = "store-3")]
    pub store_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreSwitch {
    pub store: StoreContext,
    // Só a visão admin manda o front-end para outra tela
    pub redirect_to: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub store: StoreContext,
    pub authenticated: bool,
}
