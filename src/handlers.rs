pub mod audit;
pub mod closing;
pub mod health;
pub mod loans;
pub mod news;
pub mod permissions;
pub mod receipts;
pub mod session;
