use thiserror::Error;

/// Errors raised when a series is configured with parameters it cannot honor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("retention window must be positive, got {0} ms")]
    InvalidWindow(i64),
    #[error(
        "block size {block_size} bytes cannot hold a single record ({required} bytes required)"
    )]
    BlockTooSmall { block_size: usize, required: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
