// src/remote/installment_api.rs

use crate::{
    common::context::RequestContext,
    remote::{RemoteClient, RemoteError},
};

#[derive(Clone)]
pub struct InstallmentApi {
    client: RemoteClient,
}

impl InstallmentApi {
    pub fn new(client: RemoteClient) -> Self {
        Self { client }
    }

    pub async fn delete(&self, ctx: &RequestContext, installment_id: &str) -> Result<(), RemoteError> {
        self.client.delete(ctx, &["api", "v1", "installments", installment_id]).await
    }
}
