// src/remote/receipt_api.rs

use crate::{
    common::context::RequestContext,
    models::installment::{MessageReceiptRequest, ReceiptPayload},
    remote::{RemoteClient, RemoteError},
};

#[derive(Clone)]
pub struct ReceiptApi {
    client: RemoteClient,
}

impl ReceiptApi {
    pub fn new(client: RemoteClient) -> Self {
        Self { client }
    }

    /// O PDF é renderizado pelo servidor; aqui só chegam os bytes.
    pub async fn render_pdf(&self, ctx: &RequestContext, payload: &ReceiptPayload) -> Result<Vec<u8>, RemoteError> {
        self.client.post_for_bytes(ctx, &["api", "v1", "receipt"], payload).await
    }

    pub async fn send_message(
        &self,
        ctx: &RequestContext,
        request: &MessageReceiptRequest<'_>,
    ) -> Result<(), RemoteError> {
        self.client.post(ctx, &["api", "v1", "receipt", "whatsapp"], request).await
    }
}
