// src/services/permission_service.rs

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::RwLock;

use crate::{
    common::{context::RequestContext, error::AppError},
    models::rbac::PermissionSet,
    remote::PermissionApi,
};

struct CachedPermissions {
    permissions: PermissionSet,
    fetched_at: Instant,
}

/// Resolve o conjunto de permissões do ator, com cache por token.
#[derive(Clone)]
pub struct PermissionService {
    api: PermissionApi,
    ttl: Duration,
    cache: Arc<RwLock<HashMap<String, CachedPermissions>>>,
}

impl PermissionService {
    pub fn new(api: PermissionApi, ttl: Duration) -> Self {
        Self {
            api,
            ttl,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn resolve(&self, ctx: &RequestContext) -> Result<PermissionSet, AppError> {
        let Some(token) = ctx.token() else {
            return Ok(PermissionSet::empty());
        };

        {
            let cache = self.cache.read().await;
            if let Some(entry) = cache.get(token) {
                if entry.fetched_at.elapsed() < self.ttl {
                    return Ok(entry.permissions.clone());
                }
            }
        }

        let grants = self.api.me(ctx).await?;
        let permissions = PermissionSet::from_grants(&grants);

        let mut cache = self.cache.write().await;
        let ttl = self.ttl;
        cache.retain(|_, entry| entry.fetched_at.elapsed() < ttl);
        cache.insert(
            token.to_string(),
            CachedPermissions { permissions: permissions.clone(), fetched_at: Instant::now() },
        );

        Ok(permissions)
    }

    /// Para listagens: se a resolução falhar, as linhas saem sem ações mutáveis.
    pub async fn resolve_or_empty(&self, ctx: &RequestContext) -> PermissionSet {
        match self.resolve(ctx).await {
            Ok(permissions) => permissions,
            Err(e) => {
                tracing::warn!("Permissões indisponíveis, linhas sem ações: {}", e);
                PermissionSet::empty()
            }
        }
    }
}
