//! Fixed-capacity storage for one contiguous run of samples.
//!
//! Two interchangeable implementations share the [`Block`] contract:
//!
//! - [`CompressedBlock`] keeps the first sample verbatim and every later one
//!   as a variable-width delta/XOR record.
//! - [`PlainBlock`] keeps every sample verbatim.
//!
//! A series picks one of them through its type parameter, once, at
//! construction.

mod compressed;
mod plain;

pub use compressed::CompressedBlock;
pub use plain::PlainBlock;

use crate::bytebuffer::BlockFull;

/// A single time-series sample: a millisecond timestamp and an f64 value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: i64,
    pub value: f64,
}

impl Sample {
    /// Creates a new `Sample`.
    pub fn new(time: i64, value: f64) -> Self {
        Self { time, value }
    }
}

/// Contract shared by the compressed and plain block variants.
///
/// Values travel through the codec as raw `u64` bit patterns. A block is
/// never empty: it is created together with its first sample.
pub trait Block {
    /// Smallest capacity in bytes that can hold one worst-case sample after
    /// the seed.
    const MIN_CAPACITY: usize;

    /// Creates a block of `capacity` bytes seeded with one sample.
    fn new(capacity: usize, time: i64, value: u64) -> Self
    where
        Self: Sized;

    /// Appends a sample.
    ///
    /// A `time` at or before [`end_time`](Block::end_time) is dropped and
    /// reported as `Ok`. `Err(BlockFull)` means the sample was not stored and
    /// the caller must open a new block.
    fn append(&mut self, time: i64, value: u64) -> Result<(), BlockFull>;

    fn begin_time(&self) -> i64;
    fn end_time(&self) -> i64;
    fn begin_value(&self) -> u64;
    fn end_value(&self) -> u64;

    /// Number of samples stored after the seed.
    fn size(&self) -> usize;

    /// Footprint of the stored samples in bytes.
    fn byte_size(&self) -> usize;

    /// Decodes the record at cursor `offset`, folding it into the running
    /// `time`/`value`, and returns how far the cursor advances. Returns
    /// `None` once `offset` reaches the end of the stored records.
    ///
    /// Offset 0 is the first record after the seed; the running state must
    /// start from [`begin_time`](Block::begin_time) and
    /// [`begin_value`](Block::begin_value).
    fn decode_one(&self, offset: usize, time: &mut i64, value: &mut u64) -> Option<usize>;

    /// Replaces the contents of `times`/`values` with every stored sample,
    /// seed first, and returns the sample count (`size() + 1`).
    fn decode_all(&self, times: &mut Vec<i64>, values: &mut Vec<u64>) -> usize {
        times.clear();
        values.clear();
        let mut time = self.begin_time();
        let mut value = self.begin_value();
        times.push(time);
        values.push(value);

        let mut offset = 0;
        while let Some(step) = self.decode_one(offset, &mut time, &mut value) {
            times.push(time);
            values.push(value);
            offset += step;
        }
        times.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_pairs<B: Block>(block: &B) -> Vec<(i64, u64)> {
        let mut times = Vec::new();
        let mut values = Vec::new();
        let n = block.decode_all(&mut times, &mut values);
        assert_eq!(n, block.size() + 1);
        times.into_iter().zip(values).collect()
    }

    fn check_contract<B: Block>() {
        let mut block = B::new(4096, 100, 1.5f64.to_bits());
        block.append(200, (-2.25f64).to_bits()).unwrap();
        block.append(150, 9.0f64.to_bits()).unwrap();
        block.append(200, 9.0f64.to_bits()).unwrap();
        block.append(300, 0.0f64.to_bits()).unwrap();

        assert_eq!(block.begin_time(), 100);
        assert_eq!(block.end_time(), 300);
        assert_eq!(block.begin_value(), 1.5f64.to_bits());
        assert_eq!(block.end_value(), 0.0f64.to_bits());
        assert_eq!(block.size(), 2);
        assert_eq!(
            decode_pairs(&block),
            vec![
                (100, 1.5f64.to_bits()),
                (200, (-2.25f64).to_bits()),
                (300, 0.0f64.to_bits()),
            ]
        );
    }

    #[test]
    fn test_compressed_contract() {
        check_contract::<CompressedBlock>();
    }

    #[test]
    fn test_plain_contract() {
        check_contract::<PlainBlock>();
    }

    #[test]
    fn test_decode_all_reuses_scratch() {
        let block = CompressedBlock::new(64, 5, 7);
        let mut times = vec![1, 2, 3];
        let mut values = vec![4, 5, 6];
        assert_eq!(block.decode_all(&mut times, &mut values), 1);
        assert_eq!(times, vec![5]);
        assert_eq!(values, vec![7]);
    }
}
