// src/remote/loan_api.rs

use crate::{
    common::context::RequestContext,
    models::{
        loan::{Loan, LoanFilter},
        view::Paginated,
    },
    remote::{RemoteClient, RemoteError},
};

#[derive(Clone)]
pub struct LoanApi {
    client: RemoteClient,
}

impl LoanApi {
    pub fn new(client: RemoteClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, ctx: &RequestContext, filter: &LoanFilter) -> Result<Paginated<Loan>, RemoteError> {
        self.client
            .get_json(ctx, &["api", "v1", "loans"], &filter.to_query(&ctx.store))
            .await
    }
}
