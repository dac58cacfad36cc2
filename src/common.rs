pub mod context;
pub mod error;
pub mod format;
pub mod i18n;
pub mod notification;
pub mod serde_ext;
