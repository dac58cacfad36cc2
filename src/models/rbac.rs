// src/models/rbac.rs

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Recursos que o painel protege com permissões
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Resource {
    Closing,
    Dashboard,
    Expense,
    Installment,
    Contract,
    News,
    Provider,
    Report,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
}

impl Resource {
    pub const ALL: [Resource; 8] = [
        Resource::Closing,
        Resource::Dashboard,
        Resource::Expense,
        Resource::Installment,
        Resource::Contract,
        Resource::News,
        Resource::Provider,
        Resource::Report,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Closing => "CLOSING",
            Resource::Dashboard => "DASHBOARD",
            Resource::Expense => "EXPENSE",
            Resource::Installment => "INSTALLMENT",
            Resource::Contract => "CONTRACT",
            Resource::News => "NEWS",
            Resource::Provider => "PROVIDER",
            Resource::Report => "REPORT",
        }
    }
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::View => "VIEW",
            Action::Create => "CREATE",
            Action::Edit => "EDIT",
            Action::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| s.to_string())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "VIEW" | "READ" => Ok(Action::View),
            "CREATE" => Ok(Action::Create),
            "EDIT" | "UPDATE" => Ok(Action::Edit),
            "DELETE" => Ok(Action::Delete),
            _ => Err(s.to_string()),
        }
    }
}

// O que a API de permissões devolve por recurso (tags ainda em texto)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionGrant {
    pub resource: String,
    #[serde(default)]
    pub actions: Vec<String>,
}

// Conjunto resolvido de permissões do ator atual
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PermissionSet(BTreeMap<Resource, BTreeSet<Action>>);

impl PermissionSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Converte as concessões brutas. Tags desconhecidas são ignoradas com aviso.
    pub fn from_grants(grants: &[PermissionGrant]) -> Self {
        let mut set = PermissionSet::empty();
        for grant in grants {
            let resource = match grant.resource.parse::<Resource>() {
                Ok(r) => r,
                Err(tag) => {
                    tracing::warn!(resource = %tag, "Recurso de permissão desconhecido, ignorado");
                    continue;
                }
            };
            for raw in &grant.actions {
                match raw.parse::<Action>() {
                    Ok(action) => set.grant(resource, action),
                    Err(tag) => tracing::warn!(resource = %resource, action = %tag, "Ação de permissão desconhecida, ignorada"),
                }
            }
        }
        set
    }

    pub fn grant(&mut self, resource: Resource, action: Action) {
        self.0.entry(resource).or_default().insert(action);
    }

    pub fn allows(&self, resource: Resource, action: Action) -> bool {
        self.0.get(&resource).is_some_and(|actions| actions.contains(&action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grant(resource: &str, actions: &[&str]) -> PermissionGrant {
        PermissionGrant {
            resource: resource.into(),
            actions: actions.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn grants_are_resolved_case_insensitively() {
        let set = PermissionSet::from_grants(&[grant("news", &["view", "DELETE"])]);
        assert!(set.allows(Resource::News, Action::View));
        assert!(set.allows(Resource::News, Action::Delete));
        assert!(!set.allows(Resource::News, Action::Edit));
        assert!(!set.allows(Resource::Contract, Action::View));
    }

    #[test]
    fn unknown_tags_are_skipped() {
        let set = PermissionSet::from_grants(&[grant("VEHICLE", &["VIEW"]), grant("REPORT", &["PRINT", "VIEW"])]);
        assert_eq!(set, {
            let mut expected = PermissionSet::empty();
            expected.grant(Resource::Report, Action::View);
            expected
        });
    }
}
