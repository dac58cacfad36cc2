// src/remote/news_api.rs

use serde_json::Value;

use crate::{
    common::context::RequestContext,
    models::{
        news::{LoanNewsSummaryRequest, News, NewsListQuery, NewsWriteRequest},
        view::Paginated,
    },
    remote::{Query, RemoteClient, RemoteError},
};

#[derive(Clone)]
pub struct NewsApi {
    client: RemoteClient,
}

impl NewsApi {
    pub fn new(client: RemoteClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, ctx: &RequestContext, query: &NewsListQuery) -> Result<Paginated<News>, RemoteError> {
        self.client
            .get_json(ctx, &["api", "v1", "news"], &query.to_query(&ctx.store))
            .await
    }

    pub async fn get(&self, ctx: &RequestContext, id: &str) -> Result<News, RemoteError> {
        self.client.get_json(ctx, &["api", "v1", "news", id], &Query::new()).await
    }

    pub async fn create(&self, ctx: &RequestContext, request: &NewsWriteRequest) -> Result<News, RemoteError> {
        self.client.post_json(ctx, &["api", "v1", "news"], request).await
    }

    pub async fn update(&self, ctx: &RequestContext, id: &str, request: &NewsWriteRequest) -> Result<News, RemoteError> {
        self.client.patch_json(ctx, &["api", "v1", "news", id], request).await
    }

    pub async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<(), RemoteError> {
        self.client.delete(ctx, &["api", "v1", "news", id]).await
    }

    pub async fn active_for_loan(&self, ctx: &RequestContext, loan_id: &str) -> Result<Vec<News>, RemoteError> {
        self.client
            .get_json(ctx, &["api", "v1", "news", "loan", loan_id, "active"], &Query::new())
            .await
    }

    pub async fn all_for_loan(&self, ctx: &RequestContext, loan_id: &str) -> Result<Vec<News>, RemoteError> {
        self.client
            .get_json(ctx, &["api", "v1", "news", "loan", loan_id], &Query::new())
            .await
    }

    // Formato definido pelo servidor; repassado sem transformação
    pub async fn skipped_dates(&self, ctx: &RequestContext, loan_id: &str) -> Result<Value, RemoteError> {
        self.client
            .get_json(ctx, &["api", "v1", "news", "loan", loan_id, "skipped-dates"], &Query::new())
            .await
    }

    pub async fn loans_summary(&self, ctx: &RequestContext, request: &LoanNewsSummaryRequest) -> Result<Value, RemoteError> {
        self.client
            .post_json(ctx, &["api", "v1", "news", "loans", "summary"], request)
            .await
    }
}
