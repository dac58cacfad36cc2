// src/services/installment_service.rs

use crate::{common::{context::RequestContext, error::AppError}, remote::InstallmentApi};

#[derive(Clone)]
pub struct InstallmentService {
    api: InstallmentApi,
}

impl InstallmentService {
    pub fn new(api: InstallmentApi) -> Self {
        Self { api }
    }

    pub async fn delete(&self, ctx: &RequestContext, installment_id: &str) -> Result<(), AppError> {
        self.api.delete(ctx, installment_id).await?;
        tracing::info!(installment_id = %installment_id, "Cuota removida");
        Ok(())
    }
}
