pub mod client;
pub use client::{Query, RemoteClient, RemoteError};
pub mod closing_api;
pub use closing_api::ClosingApi;
pub mod audit_api;
pub use audit_api::AuditLogApi;
pub mod receipt_api;
pub use receipt_api::ReceiptApi;
pub mod installment_api;
pub use installment_api::InstallmentApi;
pub mod news_api;
pub use news_api::NewsApi;
pub mod loan_api;
pub use loan_api::LoanApi;
pub mod permission_api;
pub use permission_api::PermissionApi;
