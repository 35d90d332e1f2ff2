pub mod ingest_client;
pub mod observations_client;
pub mod rainfall_client;
pub mod statistics_client;
