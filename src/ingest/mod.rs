pub mod anomaly;
pub mod error;
pub mod fetcher;
pub mod month_range;
pub mod parser;
pub mod pipeline;
