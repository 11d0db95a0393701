pub mod dashboard;
pub mod finance;
pub mod query;
