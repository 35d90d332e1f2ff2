use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Invalid statistics parameters: {0}")]
    Validation(String),
}
