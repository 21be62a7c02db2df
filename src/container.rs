use crate::block::Block;
use crate::config::SeriesConfig;
use crate::error::Result;
use crate::ring::RingBuffer;

/// Owns the blocks of one series and enforces its retention window.
///
/// Every sample goes to the newest block; a new block is opened when there is
/// none or the newest one is full. Eviction is lazy and block-granular: the
/// oldest block is dropped only once the block after it already starts
/// outside the window, and the newest block is never dropped.
#[derive(Debug)]
pub struct Container<B> {
    blocks: RingBuffer<B>,
    config: SeriesConfig,
}

impl<B: Block> Container<B> {
    /// Creates an empty container, rejecting configurations that could never
    /// hold a sample.
    pub fn new(config: SeriesConfig) -> Result<Self> {
        config.validate::<B>()?;
        log::debug!(
            "created container: window={}ms block_size={}B",
            config.window_millis,
            config.block_size
        );
        Ok(Self {
            blocks: RingBuffer::new(),
            config,
        })
    }

    /// Appends a sample given as a raw value bit pattern.
    ///
    /// Samples at or before the newest stored time are dropped silently.
    pub fn append(&mut self, time: i64, value: u64) {
        self.evict(time.saturating_sub(self.config.window_millis));

        let stored = match self.blocks.last_mut() {
            Some(block) => block.append(time, value).is_ok(),
            None => false,
        };
        if !stored {
            log::trace!("opening block #{} at t={}", self.blocks.len(), time);
            self.blocks.push(B::new(self.config.block_size, time, value));
        }
    }

    /// Drops leading blocks while the block after them starts at or before
    /// `min_time`.
    fn evict(&mut self, min_time: i64) {
        while self.blocks.len() > 1 {
            match self.blocks.get(1) {
                Some(next) if next.begin_time() <= min_time => {}
                _ => break,
            }
            if let Some(evicted) = self.blocks.pop_front() {
                log::debug!(
                    "evicted block [{}, {}] ({} bytes)",
                    evicted.begin_time(),
                    evicted.end_time(),
                    evicted.byte_size()
                );
            }
        }
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Returns the block at `index`, oldest first.
    pub fn block(&self, index: usize) -> Option<&B> {
        self.blocks.get(index)
    }

    /// Iterates over the blocks, oldest first.
    pub fn blocks(&self) -> impl Iterator<Item = &B> + '_ {
        self.blocks.iter()
    }

    /// Sum of every block's `byte_size()`.
    pub fn total_byte_size(&self) -> usize {
        self.blocks.iter().map(Block::byte_size).sum()
    }

    pub fn config(&self) -> &SeriesConfig {
        &self.config
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
