pub mod acts;
pub mod dashboard;
pub mod health;
pub mod stores;
pub mod summaries;
pub mod supplies;
pub mod transactions;
