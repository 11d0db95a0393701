pub mod dashboard;
pub mod orders;
pub mod payables;
pub mod period;
pub mod purchases;
