// src/remote/permission_api.rs

use serde::Deserialize;

use crate::{
    common::context::RequestContext,
    models::rbac::PermissionGrant,
    remote::{Query, RemoteClient, RemoteError},
};

// O servidor devolve a lista pura ou embrulhada em `{ permissions: [...] }`
#[derive(Deserialize)]
#[serde(untagged)]
enum GrantsResponse {
    Bare(Vec<PermissionGrant>),
    Wrapped { permissions: Vec<PermissionGrant> },
}

#[derive(Clone)]
pub struct PermissionApi {
    client: RemoteClient,
}

impl PermissionApi {
    pub fn new(client: RemoteClient) -> Self {
        Self { client }
    }

    /// Concessões do ator autenticado pelo token do contexto.
    pub async fn me(&self, ctx: &RequestContext) -> Result<Vec<PermissionGrant>, RemoteError> {
        let response: GrantsResponse = self
            .client
            .get_json(ctx, &["api", "v1", "permissions", "me"], &Query::new())
            .await?;

        Ok(match response {
            GrantsResponse::Bare(grants) | GrantsResponse::Wrapped { permissions: grants } => grants,
        })
    }
}
