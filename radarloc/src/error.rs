use thiserror::Error;

#[derive(Error, Debug)]
pub enum RadarlocError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
