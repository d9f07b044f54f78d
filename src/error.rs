use thiserror::Error;

#[derive(Error, Debug)]
pub enum UtlaggError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Bad form payload: {0}")]
    BadForm(String),

    #[error("Form is not submittable")]
    NotSubmittable,
}

pub type Result<T> = std::result::Result<T, UtlaggError>;
