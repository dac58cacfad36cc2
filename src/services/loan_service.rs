// src/services/loan_service.rs

use crate::{
    common::{context::RequestContext, error::AppError},
    models::{
        loan::{Loan, LoanFilter},
        rbac::{PermissionSet, Resource},
        view::{Paginated, TableRow},
    },
    remote::LoanApi,
};

#[derive(Clone)]
pub struct LoanService {
    api: LoanApi,
}

impl LoanService {
    pub fn new(api: LoanApi) -> Self {
        Self { api }
    }

    /// Lista contratos com os botões de linha já decididos pelo conjunto de permissões.
    pub async fn list_rows(
        &self,
        ctx: &RequestContext,
        filter: &LoanFilter,
        permissions: &PermissionSet,
    ) -> Result<Paginated<TableRow<Loan>>, AppError> {
        let page = self.api.list(ctx, filter).await?;
        Ok(page.map(|loans| TableRow::gate(loans, permissions, Resource::Contract)))
    }
}
