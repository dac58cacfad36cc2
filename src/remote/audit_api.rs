// src/remote/audit_api.rs

use crate::{
    common::context::RequestContext,
    models::{
        audit::{AuditLog, AuditLogFilter, AuditStatistics},
        view::Paginated,
    },
    remote::{Query, RemoteClient, RemoteError},
};

const AUDIT_LOGS: [&str; 3] = ["api", "v1", "audit-logs"];

#[derive(Clone)]
pub struct AuditLogApi {
    client: RemoteClient,
}

impl AuditLogApi {
    pub fn new(client: RemoteClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, ctx: &RequestContext, filter: &AuditLogFilter) -> Result<Paginated<AuditLog>, RemoteError> {
        self.client.get_json(ctx, &AUDIT_LOGS, &filter.to_query(&ctx.store)).await
    }

    pub async fn get(&self, ctx: &RequestContext, id: &str) -> Result<AuditLog, RemoteError> {
        self.client.get_json(ctx, &path(&[id]), &Query::new()).await
    }

    pub async fn by_entity(
        &self,
        ctx: &RequestContext,
        entity: &str,
        entity_id: &str,
        filter: &AuditLogFilter,
    ) -> Result<Paginated<AuditLog>, RemoteError> {
        self.client
            .get_json(ctx, &path(&["entity", entity, entity_id]), &filter.to_query(&ctx.store))
            .await
    }

    pub async fn by_actor(
        &self,
        ctx: &RequestContext,
        actor_id: &str,
        filter: &AuditLogFilter,
    ) -> Result<Paginated<AuditLog>, RemoteError> {
        self.client
            .get_json(ctx, &path(&["actor", actor_id]), &filter.to_query(&ctx.store))
            .await
    }

    pub async fn statistics(&self, ctx: &RequestContext, filter: &AuditLogFilter) -> Result<AuditStatistics, RemoteError> {
        self.client
            .get_json(ctx, &path(&["statistics"]), &filter.to_query(&ctx.store))
            .await
    }
}

fn path<'a>(rest: &[&'a str]) -> Vec<&'a str> {
    AUDIT_LOGS.iter().copied().chain(rest.iter().copied()).collect()
}
