// src/services/audit_service.rs
//
// Somente leitura: o gateway não cria nem altera registros de auditoria.

use crate::{
    common::{context::RequestContext, error::AppError},
    models::{
        audit::{AuditLog, AuditLogFilter, AuditStatistics},
        view::Paginated,
    },
    remote::AuditLogApi,
};

#[derive(Clone)]
pub struct AuditService {
    api: AuditLogApi,
}

impl AuditService {
    pub fn new(api: AuditLogApi) -> Self {
        Self { api }
    }

    pub async fn list(&self, ctx: &RequestContext, filter: &AuditLogFilter) -> Result<Paginated<AuditLog>, AppError> {
        Ok(self.api.list(ctx, filter).await?)
    }

    pub async fn get(&self, ctx: &RequestContext, id: &str) -> Result<AuditLog, AppError> {
        Ok(self.api.get(ctx, id).await?)
    }

    pub async fn by_entity(
        &self,
        ctx: &RequestContext,
        entity: &str,
        entity_id: &str,
        filter: &AuditLogFilter,
    ) -> Result<Paginated<AuditLog>, AppError> {
        Ok(self.api.by_entity(ctx, entity, entity_id, filter).await?)
    }

    pub async fn by_actor(
        &self,
        ctx: &RequestContext,
        actor_id: &str,
        filter: &AuditLogFilter,
    ) -> Result<Paginated<AuditLog>, AppError> {
        Ok(self.api.by_actor(ctx, actor_id, filter).await?)
    }

    pub async fn statistics(&self, ctx: &RequestContext, filter: &AuditLogFilter) -> Result<AuditStatistics, AppError> {
        Ok(self.api.statistics(ctx, filter).await?)
    }
}
