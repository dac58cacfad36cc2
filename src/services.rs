pub mod audit_service;
pub mod closing_service;
pub mod document_opener;
pub mod installment_service;
pub mod loan_service;
pub mod news_service;
pub mod permission_service;
pub mod receipt_service;
pub mod session_service;
