use crate::block::Block;
use crate::error::{Error, Result};

/// Default block capacity in bytes.
pub const DEFAULT_BLOCK_SIZE: usize = 8192;

/// Configuration for a series: retention window and block capacity.
///
/// # Example
/// ```
/// use tsarray::{CompressedBlock, SeriesConfig};
///
/// let config = SeriesConfig::new(60_000).with_block_size(4096);
/// assert!(config.validate::<CompressedBlock>().is_ok());
/// assert!(SeriesConfig::new(0).validate::<CompressedBlock>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesConfig {
    /// Trailing span of time, in milliseconds, that the series keeps.
    pub window_millis: i64,
    /// Capacity of each block in bytes.
    pub block_size: usize,
}

impl SeriesConfig {
    /// Creates a configuration with the default block size.
    pub fn new(window_millis: i64) -> Self {
        Self {
            window_millis,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Checks that a series of `B` blocks can actually store data under this
    /// configuration.
    pub fn validate<B: Block>(&self) -> Result<()> {
        if self.window_millis <= 0 {
            return Err(Error::InvalidWindow(self.window_millis));
        }
        if self.block_size < B::MIN_CAPACITY {
            return Err(Error::BlockTooSmall {
                block_size: self.block_size,
                required: B::MIN_CAPACITY,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{CompressedBlock, PlainBlock};

    #[test]
    fn test_defaults() {
        let config = SeriesConfig::new(1000);
        assert_eq!(config.window_millis, 1000);
        assert_eq!(config.block_size, DEFAULT_BLOCK_SIZE);
        assert_eq!(config.with_block_size(64).block_size, 64);
    }

    #[test]
    fn test_rejects_non_positive_window() {
        assert_eq!(
            SeriesConfig::new(0).validate::<CompressedBlock>(),
            Err(Error::InvalidWindow(0))
        );
        assert_eq!(
            SeriesConfig::new(-10).validate::<PlainBlock>(),
            Err(Error::InvalidWindow(-10))
        );
    }

    #[test]
    fn test_minimum_block_size_per_variant() {
        let config = SeriesConfig::new(1000).with_block_size(13);
        assert!(config.validate::<CompressedBlock>().is_ok());
        assert_eq!(
            config.validate::<PlainBlock>(),
            Err(Error::BlockTooSmall {
                block_size: 13,
                required: 16
            })
        );
        assert!(config
            .with_block_size(12)
            .validate::<CompressedBlock>()
            .is_err());
    }
}
