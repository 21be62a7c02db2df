use crate::block::Block;
use crate::bytebuffer::{BlockFull, ByteBuffer, ByteReader};

/// Bytes charged for the verbatim seed sample (time + value).
const SEED_BYTES: usize = 16;

/// Largest possible record: descriptor, 4-byte time delta, 8-byte residual.
const MAX_RECORD_BYTES: usize = 1 + 4 + 8;

/// A block that byte-packs samples as delta/XOR records.
///
/// The seed sample is kept verbatim in the block header. Each later sample is
/// one record:
///
/// | field      | width       | content                                   |
/// |------------|-------------|-------------------------------------------|
/// | descriptor | 1 byte      | `(w_t - 1) << 6 \| w_v`                   |
/// | time delta | `w_t` bytes | `time - prev_time`, little-endian, 1..=4  |
/// | residual   | `w_v` bytes | `value ^ prev_value` with its trailing    |
/// |            |             | zero bytes shifted out, little-endian     |
///
/// `w_v` is 0 when the value did not change.
///
/// # Example
/// ```
/// use tsarray::{Block, CompressedBlock};
///
/// let mut block = CompressedBlock::new(256, 1_000, 1.0f64.to_bits());
/// block.append(1_100, 1.0f64.to_bits()).unwrap();
/// block.append(1_200, 2.0f64.to_bits()).unwrap();
/// assert_eq!(block.size(), 2);
/// assert!(block.byte_size() < 3 * 16);
/// ```
#[derive(Debug, Clone)]
pub struct CompressedBlock {
    buf: ByteBuffer,
    /// Number of records after the seed.
    records: usize,
    begin_time: i64,
    end_time: i64,
    begin_value: u64,
    end_value: u64,
}

impl CompressedBlock {
    /// Returns the encoded record bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.buf.as_bytes()
    }

    /// Returns the fixed record capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.buf.limit()
    }

    // ── internal helpers ───────────────────────────────────────────────

    /// Writes one record. The caller has already checked that it fits.
    fn write_record(
        &mut self,
        time_width: usize,
        delta: u32,
        value_width: usize,
        residual: u64,
    ) -> Result<(), BlockFull> {
        let descriptor = (((time_width - 1) as u8) << 6) | value_width as u8;
        self.buf.write_u8(descriptor)?;
        self.buf.write_le(u64::from(delta), time_width)?;
        self.buf.write_le(residual, value_width)?;
        Ok(())
    }
}

impl Block for CompressedBlock {
    const MIN_CAPACITY: usize = MAX_RECORD_BYTES;

    fn new(capacity: usize, time: i64, value: u64) -> Self {
        Self {
            buf: ByteBuffer::with_limit(capacity),
            records: 0,
            begin_time: time,
            end_time: time,
            begin_value: value,
            end_value: value,
        }
    }

    fn append(&mut self, time: i64, value: u64) -> Result<(), BlockFull> {
        if time <= self.end_time {
            return Ok(());
        }

        // Deltas wider than 32 bits cannot be encoded; start a new block.
        let delta = u32::try_from(time.abs_diff(self.end_time)).map_err(|_| BlockFull)?;
        let time_width = time_width(delta);

        let xor = value ^ self.end_value;
        let zero_bytes = (xor.trailing_zeros() / 8) as usize;
        let residual = if zero_bytes == 8 { 0 } else { xor >> (zero_bytes * 8) };
        let value_width = 8 - zero_bytes;

        if 1 + time_width + value_width > self.buf.remaining_capacity() {
            return Err(BlockFull);
        }
        self.write_record(time_width, delta, value_width, residual)?;

        self.end_time = time;
        self.end_value = value;
        self.records += 1;
        Ok(())
    }

    fn begin_time(&self) -> i64 {
        self.begin_time
    }

    fn end_time(&self) -> i64 {
        self.end_time
    }

    fn begin_value(&self) -> u64 {
        self.begin_value
    }

    fn end_value(&self) -> u64 {
        self.end_value
    }

    fn size(&self) -> usize {
        self.records
    }

    fn byte_size(&self) -> usize {
        SEED_BYTES + self.buf.len()
    }

    fn decode_one(&self, offset: usize, time: &mut i64, value: &mut u64) -> Option<usize> {
        let mut reader = ByteReader::at(self.buf.as_bytes(), offset);
        let descriptor = reader.read_u8()?;
        let time_width = usize::from(descriptor >> 6) + 1;
        let value_width = usize::from(descriptor & 0x0F);

        let delta = reader.read_le(time_width)?;
        let residual = reader.read_le(value_width)?;

        *time += delta as i64;
        *value ^= restore_xor(residual, value_width);
        Some(reader.position() - offset)
    }
}

/// Smallest number of bytes (1..=4) that holds `delta`.
#[inline]
fn time_width(delta: u32) -> usize {
    4 - (delta.leading_zeros() / 8).min(3) as usize
}

/// Shifts a right-justified residual of `width` bytes back to its original
/// bit position. A zero width means the value was unchanged.
#[inline]
fn restore_xor(residual: u64, width: usize) -> u64 {
    if width == 0 {
        0
    } else {
        residual << ((8 - width) * 8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_width() {
        assert_eq!(time_width(1), 1);
        assert_eq!(time_width(0xFF), 1);
        assert_eq!(time_width(0x100), 2);
        assert_eq!(time_width(0xFFFF), 2);
        assert_eq!(time_width(0x1_0000), 3);
        assert_eq!(time_width(0xFF_FFFF), 3);
        assert_eq!(time_width(0x100_0000), 4);
        assert_eq!(time_width(u32::MAX), 4);
    }

    #[test]
    fn test_unchanged_value_is_two_bytes() {
        let mut block = CompressedBlock::new(64, 1000, 42.0f64.to_bits());
        block.append(1100, 42.0f64.to_bits()).unwrap();
        // descriptor + 1-byte delta, no residual
        assert_eq!(block.as_bytes(), &[0x00, 100]);
        assert_eq!(block.byte_size(), 18);
    }

    #[test]
    fn test_record_layout() {
        let mut block = CompressedBlock::new(64, 0, 0);
        // delta 0x1234 needs two bytes; xor 0xAB00_0000_0000_0000 has seven
        // trailing zero bytes, leaving one residual byte.
        block.append(0x1234, 0xAB00_0000_0000_0000).unwrap();
        assert_eq!(block.as_bytes(), &[(1 << 6) | 1, 0x34, 0x12, 0xAB]);

        let mut time = block.begin_time();
        let mut value = block.begin_value();
        assert_eq!(block.decode_one(0, &mut time, &mut value), Some(4));
        assert_eq!(time, 0x1234);
        assert_eq!(value, 0xAB00_0000_0000_0000);
        assert_eq!(block.decode_one(4, &mut time, &mut value), None);
    }

    #[test]
    fn test_full_width_residual() {
        let mut block = CompressedBlock::new(64, 10, 0);
        block.append(11, 0x8000_0000_0000_0001).unwrap();
        assert_eq!(block.as_bytes().len(), 1 + 1 + 8);
        assert_eq!(block.as_bytes()[0], 8);
    }

    #[test]
    fn test_duplicate_and_out_of_order_dropped() {
        let mut block = CompressedBlock::new(64, 300, 1);
        assert_eq!(block.append(300, 2), Ok(()));
        assert_eq!(block.append(250, 3), Ok(()));
        assert_eq!(block.size(), 0);
        assert_eq!(block.end_time(), 300);
        assert_eq!(block.end_value(), 1);
        assert!(block.as_bytes().is_empty());
    }

    #[test]
    fn test_rejects_when_full() {
        let mut block = CompressedBlock::new(MAX_RECORD_BYTES, 0, 0);
        block.append(0x100, 0x0100_0000_0000_0000).unwrap();
        assert_eq!(block.as_bytes().len(), 4);
        // A full-width record no longer fits in the remaining 9 bytes.
        assert_eq!(block.append(0x101, u64::MAX), Err(BlockFull));
        assert_eq!(block.end_time(), 0x100);
        assert_eq!(block.size(), 1);
        // An unchanged value still does.
        assert_eq!(block.append(0x102, 0x0100_0000_0000_0000), Ok(()));
        assert_eq!(block.size(), 2);
        assert_eq!(block.as_bytes().len(), 6);
    }

    #[test]
    fn test_wide_time_delta_reports_full() {
        let mut block = CompressedBlock::new(64, 0, 0);
        assert_eq!(block.append(i64::from(u32::MAX) + 1, 0), Err(BlockFull));
        assert_eq!(block.append(i64::from(u32::MAX), 0), Ok(()));
        assert_eq!(block.end_time(), i64::from(u32::MAX));
    }

    #[test]
    fn test_extreme_times_do_not_overflow() {
        let mut block = CompressedBlock::new(64, i64::MIN, 0);
        assert_eq!(block.append(i64::MAX, 0), Err(BlockFull));
        let mut block = CompressedBlock::new(64, i64::MAX - 10, 0);
        block.append(i64::MAX, 5).unwrap();
        let mut times = Vec::new();
        let mut values = Vec::new();
        block.decode_all(&mut times, &mut values);
        assert_eq!(times, vec![i64::MAX - 10, i64::MAX]);
        assert_eq!(values, vec![0, 5]);
    }

    #[test]
    fn test_roundtrip_special_values() {
        let values = [
            1.0f64,
            f64::NAN,
            f64::INFINITY,
            f64::NEG_INFINITY,
            -0.0,
            0.0,
            f64::MIN_POSITIVE,
            f64::MAX,
        ];
        let mut block = CompressedBlock::new(1024, 0, values[0].to_bits());
        for (i, v) in values.iter().enumerate().skip(1) {
            block.append(i as i64 * 155, v.to_bits()).unwrap();
        }

        let mut times = Vec::new();
        let mut decoded = Vec::new();
        assert_eq!(block.decode_all(&mut times, &mut decoded), values.len());
        for (i, v) in values.iter().enumerate() {
            assert_eq!(times[i], i as i64 * 155);
            assert_eq!(decoded[i], v.to_bits());
        }
    }

    #[test]
    fn test_slowly_varying_values_compress() {
        let mut block = CompressedBlock::new(8192, 0, 20.0f64.to_bits());
        for i in 1..200 {
            let v = 20.0 + (i % 4) as f64 * 0.5;
            block.append(i * 60, v.to_bits()).unwrap();
        }
        assert_eq!(block.size(), 199);
        assert!(block.byte_size() < 200 * 16 / 2);
    }
}
