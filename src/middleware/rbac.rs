// src/middleware/rbac.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::marker::PhantomData;

use crate::{
    common::{context::RequestContext, error::{ApiError, AppError}},
    config::AppState,
    middleware::i18n::Locale,
    models::rbac::{Action, Resource},
};

/// 1. O Trait que define o que é uma Permissão
pub trait PermissionDef: Send + Sync + 'static {
    fn resource() -> Resource;
    fn action() -> Action;
}

/// 2. O Extractor (Guardião)
pub struct RequirePermission<T>(pub PhantomData<T>);

// 3. Implementação do FromRequestParts

impl<T, S> FromRequestParts<S> for RequirePermission<T>
where
    T: PermissionDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let locale = Locale::from_parts(parts);
        let ctx = RequestContext::from_parts(parts);

        // A. Sem token não há ator para consultar
        if ctx.token.is_none() {
            return Err(AppError::MissingToken.to_api_error(&locale));
        }

        // B. Conjunto resolvido (com cache)
        let permissions = app_state
            .permission_service
            .resolve(&ctx)
            .await
            .map_err(|e| e.to_api_error(&locale))?;

        // C. Verifica recurso + ação
        let (resource, action) = (T::resource(), T::action());
        if !permissions.allows(resource, action) {
            tracing::warn!(%resource, %action, "Ação negada pelo conjunto de permissões");
            return Err(AppError::Forbidden { resource, action }.to_api_error(&locale));
        }

        Ok(RequirePermission(PhantomData))
    }
}

// ---
// DEFINIÇÃO DAS PERMISSÕES (TIPOS)
// ---

pub struct PermNewsCreate;
impl PermissionDef for PermNewsCreate {
    fn resource() -> Resource { Resource::News }
    fn action() -> Action { Action::Create }
}

pub struct PermNewsEdit;
impl PermissionDef for PermNewsEdit {
    fn resource() -> Resource { Resource::News }
    fn action() -> Action { Action::Edit }
}

pub struct PermNewsDelete;
impl PermissionDef for PermNewsDelete {
    fn resource() -> Resource { Resource::News }
    fn action() -> Action { Action::Delete }
}

pub struct PermInstallmentDelete;
impl PermissionDef for PermInstallmentDelete {
    fn resource() -> Resource { Resource::Installment }
    fn action() -> Action { Action::Delete }
}
