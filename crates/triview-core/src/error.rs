use thiserror::Error;

#[derive(Error, Debug)]
pub enum TriviewError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Validation(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("server returned {status}: {message}")]
    Http { status: u16, message: String },

    #[error("volume shape unavailable: {0}")]
    ShapeUnavailable(String),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("unexpected response body: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, TriviewError>;
