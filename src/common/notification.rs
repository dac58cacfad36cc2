// src/common/notification.rs

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

// O "toast" transitório que o front-end mostra depois de cada ação
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub dismissable: bool,
}

impl Notification {
    pub fn success(message: &str) -> Self {
        Self { kind: NotificationKind::Success, message: message.to_string(), dismissable: true }
    }

    pub fn error(message: &str) -> Self {
        Self { kind: NotificationKind::Error, message: message.to_string(), dismissable: true }
    }

    pub fn is_success(&self) -> bool {
        self.kind == NotificationKind::Success
    }
}
