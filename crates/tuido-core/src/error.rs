use thiserror::Error;

#[derive(Debug, Error)]
pub enum TuidoError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
