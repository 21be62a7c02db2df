use crate::block::{Block, Sample};
use crate::container::Container;

/// Forward cursor over every sample in a container, oldest first.
///
/// Decodes one record per step, carrying the running time and value across
/// records and re-seeding them at each block boundary. It can be driven
/// explicitly through [`is_valid`](Iter::is_valid) /
/// [`advance`](Iter::advance), or as a standard [`Iterator`].
///
/// # Example
/// ```
/// use tsarray::CompressedSeries;
///
/// let mut series = CompressedSeries::new(60_000).unwrap();
/// series.append(100, 1.5);
/// series.append(200, -2.25);
///
/// let mut cursor = series.iter();
/// while cursor.is_valid() {
///     println!("{}: {}", cursor.time(), cursor.value());
///     cursor.advance();
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Iter<'a, B> {
    container: &'a Container<B>,
    /// Current block; `None` once exhausted.
    block: Option<&'a B>,
    block_index: usize,
    /// Cursor within the current block's records.
    offset: usize,
    time: i64,
    value: u64,
}

impl<'a, B: Block> Iter<'a, B> {
    /// Creates a cursor at the oldest sample, or an exhausted one if the
    /// container is empty.
    pub fn new(container: &'a Container<B>) -> Self {
        let block = container.block(0);
        Self {
            container,
            block,
            block_index: 0,
            offset: 0,
            time: block.map_or(0, Block::begin_time),
            value: block.map_or(0, Block::begin_value),
        }
    }

    /// Returns `true` while the cursor points at a sample.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.block.is_some()
    }

    /// Time of the current sample.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is exhausted.
    #[inline]
    pub fn time(&self) -> i64 {
        assert!(self.is_valid(), "time() called on an exhausted iterator");
        self.time
    }

    /// Value of the current sample.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is exhausted.
    #[inline]
    pub fn value(&self) -> f64 {
        f64::from_bits(self.value_bits())
    }

    /// Raw bit pattern of the current value.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is exhausted.
    #[inline]
    pub fn value_bits(&self) -> u64 {
        assert!(self.is_valid(), "value() called on an exhausted iterator");
        self.value
    }

    /// Moves to the next sample.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is already exhausted.
    pub fn advance(&mut self) {
        let Some(block) = self.block else {
            panic!("advance() called on an exhausted iterator");
        };

        if let Some(step) = block.decode_one(self.offset, &mut self.time, &mut self.value) {
            self.offset += step;
            return;
        }

        self.block_index += 1;
        self.block = self.container.block(self.block_index);
        if let Some(next) = self.block {
            self.offset = 0;
            self.time = next.begin_time();
            self.value = next.begin_value();
        }
    }
}

impl<'a, B: Block> Iterator for Iter<'a, B> {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        if !self.is_valid() {
            return None;
        }
        let sample = Sample::new(self.time, f64::from_bits(self.value));
        self.advance();
        Some(sample)
    }
}
