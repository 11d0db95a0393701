pub mod carry_over;
pub mod dashboard_service;
pub mod order_filter;
pub mod payables_summary;
pub mod period_aggregator;
pub mod refresh;
pub mod visibility;
