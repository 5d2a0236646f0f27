use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeconvError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DeconvError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, DeconvError>;
