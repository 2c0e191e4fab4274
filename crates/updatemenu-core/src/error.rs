pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid layout: {message}")]
    InvalidLayout { message: String },

    #[error("Button index {index} out of range (menu has {len} buttons)")]
    ButtonOutOfRange { index: usize, len: usize },

    #[error("Chart method {method} failed: {message}")]
    ChartMethod { method: String, message: String },

    #[error("Layout JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
