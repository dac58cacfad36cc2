// src/services/session_service.rs

use validator::Validate;

use crate::{
    common::{error::AppError, i18n::FieldMessage},
    middleware::store::{StoreContext, ADMIN_VIEW_ID},
    models::session::{StoreSwitch, SwitchStorePayload},
};

pub const ADMIN_DASHBOARD_PATH: &str = "/admin/dashboard";

/// Decide o novo contexto de loja. O cookie é escrito pelo handler.
pub fn switch_store(payload: &SwitchStorePayload) -> Result<StoreSwitch, AppError> {
    payload.validate()?;
    let store_id = payload.store_id.trim();
    if store_id.is_empty() {
        return Err(AppError::invalid_field("storeId", FieldMessage::StoreRequired));
    }

    if store_id == ADMIN_VIEW_ID {
        return Ok(StoreSwitch { store: StoreContext::Admin, redirect_to: Some(ADMIN_DASHBOARD_PATH) });
    }

    Ok(StoreSwitch { store: StoreContext::from_id(store_id), redirect_to: None })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(id: &str) -> SwitchStorePayload {
        SwitchStorePayload { store_id: id.into() }
    }

    #[test]
    fn admin_view_redirects_to_dashboard() {
        let switch = switch_store(&payload("admin-view")).unwrap();
        assert_eq!(switch.store, StoreContext::Admin);
        assert_eq!(switch.redirect_to, Some("/admin/dashboard"));
    }

    #[test]
    fn concrete_store_stays_on_page() {
        let switch = switch_store(&payload("store-3")).unwrap();
        assert_eq!(switch.store.store_id(), Some("store-3"));
        assert_eq!(switch.redirect_to, None);
    }

    #[test]
    fn blank_store_id_is_rejected() {
        assert!(matches!(switch_store(&payload("")), Err(AppError::ValidationError(_))));
        assert!(matches!(switch_store(&payload("   ")), Err(AppError::ValidationError(_))));
    }
}
