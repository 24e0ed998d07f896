use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("History file is not valid UTF-8: {path}")]
    InvalidEncoding { path: String },
}

impl HistoryError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            HistoryError::Io(_) => true,
            HistoryError::InvalidEncoding { .. } => false,
        }
    }
}
