pub mod buckets;
pub mod coerce;
pub mod error;
pub mod rainfall_totals;
pub mod rainy_days;
pub mod trend;
