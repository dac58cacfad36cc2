// src/remote/closing_api.rs

use crate::{
    common::context::RequestContext,
    models::closing::ClosingValidationResult,
    remote::{Query, RemoteClient, RemoteError},
};

#[derive(Clone)]
pub struct ClosingApi {
    client: RemoteClient,
}

impl ClosingApi {
    pub fn new(client: RemoteClient) -> Self {
        Self { client }
    }

    // Rota fora do prefixo versionado
    pub async fn validate(
        &self,
        ctx: &RequestContext,
        cash_register_id: &str,
    ) -> Result<ClosingValidationResult, RemoteError> {
        self.client
            .get_json(ctx, &["closing", "validate", cash_register_id], &Query::new())
            .await
    }
}
