// src/models/view.rs
//
// Envelopes que os componentes de tabela e de busca do painel consomem.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::rbac::{Action, PermissionSet, Resource};

// Botões mutáveis de uma linha de tabela
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RowActions {
    pub can_edit: bool,
    pub can_delete: bool,
}

impl RowActions {
    /// Um controle só aparece quando a ação está no conjunto resolvido do ator.
    pub fn for_resource(permissions: &PermissionSet, resource: Resource) -> Self {
        Self {
            can_edit: permissions.allows(resource, Action::Edit),
            can_delete: permissions.allows(resource, Action::Delete),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TableRow<T> {
    #[serde(flatten)]
    pub item: T,
    pub actions: RowActions,
}

impl<T> TableRow<T> {
    pub fn gate(items: Vec<T>, permissions: &PermissionSet, resource: Resource) -> Vec<TableRow<T>> {
        let actions = RowActions::for_resource(permissions, resource);
        items.into_iter().map(|item| TableRow { item, actions }).collect()
    }
}

// Envelope de paginação da API remota
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total_pages: u32,
}

fn default_page() -> u32 {
    1
}

impl<T> Paginated<T> {
    pub fn map<U>(self, f: impl FnOnce(Vec<T>) -> Vec<U>) -> Paginated<U> {
        Paginated {
            data: f(self.data),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}

/// Estado de uma busca: carregando, erro, resultado.
/// Uma falha marca `error` e descarta qualquer resultado anterior. Não há retry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchState<T> {
    pub loading: bool,
    pub error: bool,
    pub data: Option<T>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self { loading: false, error: false, data: None }
    }
}

impl<T> FetchState<T> {
    pub fn begin(&mut self) {
        self.loading = true;
    }

    pub fn resolve<E>(&mut self, result: Result<T, E>) -> Option<E> {
        self.loading = false;
        match result {
            Ok(value) => {
                self.error = false;
                self.data = Some(value);
                None
            }
            Err(e) => {
                self.error = true;
                self.data = None;
                Some(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn permissions(grants: &[(Resource, Action)]) -> PermissionSet {
        let mut set = PermissionSet::empty();
        for (r, a) in grants {
            set.grant(*r, *a);
        }
        set
    }

    #[test]
    fn mutating_controls_follow_the_resolved_set() {
        let cases = [
            (vec![], false, false),
            (vec![(Resource::News, Action::Edit)], true, false),
            (vec![(Resource::News, Action::Delete)], false, true),
            (vec![(Resource::News, Action::Edit), (Resource::News, Action::Delete)], true, true),
        ];
        for (grants, edit, delete) in cases {
            let actions = RowActions::for_resource(&permissions(&grants), Resource::News);
            assert_eq!(actions, RowActions { can_edit: edit, can_delete: delete });
        }
    }

    #[test]
    fn grants_on_another_resource_do_not_leak() {
        let set = permissions(&[(Resource::Contract, Action::Edit), (Resource::Contract, Action::Delete)]);
        let actions = RowActions::for_resource(&set, Resource::Installment);
        assert!(!actions.can_edit && !actions.can_delete);
    }

    #[test]
    fn view_only_never_shows_mutating_controls() {
        let set = permissions(&[(Resource::Closing, Action::View), (Resource::Closing, Action::Create)]);
        assert_eq!(
            RowActions::for_resource(&set, Resource::Closing),
            RowActions { can_edit: false, can_delete: false }
        );
    }

    #[test]
    fn failed_fetch_clears_previous_result() {
        let mut state: FetchState<u32> = FetchState::default();
        state.begin();
        assert!(state.resolve::<()>(Ok(7)).is_none());
        assert_eq!(state.data, Some(7));

        state.begin();
        assert!(state.loading);
        assert_eq!(state.resolve(Err("boom")), Some("boom"));
        assert_eq!(state, FetchState { loading: false, error: true, data: None });
    }
}
