pub mod audit;
pub mod closing;
pub mod installment;
pub mod loan;
pub mod news;
pub mod rbac;
pub mod session;
pub mod view;
