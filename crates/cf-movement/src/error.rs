use thiserror::Error;

#[derive(Debug, Error)]
pub enum MovementError {
    #[error("movement file error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type MovementResult<T> = Result<T, MovementError>;
