use crate::block::Block;
use crate::bytebuffer::BlockFull;

/// Bytes per verbatim sample (i64 time + u64 value).
const SAMPLE_BYTES: usize = 16;

/// A block that stores every sample verbatim.
///
/// Trades memory for simplicity and serves as the baseline for compression
/// ratios: its `byte_size()` is always `16 × sample count`. A block of
/// `capacity` bytes holds the seed plus `capacity / 16` more samples.
#[derive(Debug, Clone)]
pub struct PlainBlock {
    times: Vec<i64>,
    values: Vec<u64>,
    /// Maximum number of samples including the seed.
    max_samples: usize,
}

impl Block for PlainBlock {
    const MIN_CAPACITY: usize = SAMPLE_BYTES;

    fn new(capacity: usize, time: i64, value: u64) -> Self {
        let max_samples = capacity / SAMPLE_BYTES + 1;
        let mut times = Vec::with_capacity(max_samples);
        let mut values = Vec::with_capacity(max_samples);
        times.push(time);
        values.push(value);
        Self {
            times,
            values,
            max_samples,
        }
    }

    fn append(&mut self, time: i64, value: u64) -> Result<(), BlockFull> {
        if time <= self.end_time() {
            return Ok(());
        }
        if self.times.len() >= self.max_samples {
            return Err(BlockFull);
        }
        self.times.push(time);
        self.values.push(value);
        Ok(())
    }

    fn begin_time(&self) -> i64 {
        self.times[0]
    }

    fn end_time(&self) -> i64 {
        self.times[self.times.len() - 1]
    }

    fn begin_value(&self) -> u64 {
        self.values[0]
    }

    fn end_value(&self) -> u64 {
        self.values[self.values.len() - 1]
    }

    fn size(&self) -> usize {
        self.times.len() - 1
    }

    fn byte_size(&self) -> usize {
        self.times.len() * SAMPLE_BYTES
    }

    /// The cursor counts samples after the seed; each step is one sample.
    fn decode_one(&self, offset: usize, time: &mut i64, value: &mut u64) -> Option<usize> {
        *time = *self.times.get(offset + 1)?;
        *value = self.values[offset + 1];
        Some(1)
    }

    fn decode_all(&self, times: &mut Vec<i64>, values: &mut Vec<u64>) -> usize {
        times.clear();
        values.clear();
        times.extend_from_slice(&self.times);
        values.extend_from_slice(&self.values);
        self.times.len()
    }
}
