use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Preference storage unavailable: {0}")]
    Unavailable(String),

    #[error("Preference storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed preference record: {0}")]
    Serde(#[from] serde_json::Error),
}
