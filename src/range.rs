use crate::block::{Block, Sample};
use crate::container::Container;

/// Forward cursor over the samples of a container that cover a time
/// interval `[begin, end]`.
///
/// A negative `end` means the interval is unbounded above; if `begin` is
/// negative as well the range is empty.
///
/// The starting block is the first one whose end time reaches `end`; it is
/// decoded whole into scratch and the cursor moves to its last sample at or
/// before `begin` (or its first sample). Iteration then walks the decoded
/// samples block by block and stops right after yielding the first sample at
/// or past `end`. A bounded range whose `end` lies beyond every stored
/// sample is therefore empty, and a bounded range only sees samples from its
/// starting block onwards.
///
/// `range(0, -1)` visits the same samples as full iteration only when every
/// sample time is non-negative. The block seek compares end times against
/// the raw `-1`, so blocks ending before it are skipped, and `begin = 0`
/// moves the cursor past earlier negative samples in the starting block.
#[derive(Debug, Clone)]
pub struct RangeIter<'a, B> {
    container: &'a Container<B>,
    valid: bool,
    begin: i64,
    end: i64,
    times: Vec<i64>,
    values: Vec<u64>,
    /// Position in the decoded scratch.
    index: usize,
    block_index: usize,
}

impl<'a, B: Block> RangeIter<'a, B> {
    pub fn new(container: &'a Container<B>, begin: i64, end: i64) -> Self {
        let mut iter = Self {
            container,
            valid: false,
            begin,
            end: if end < 0 { i64::MAX } else { end },
            times: Vec::new(),
            values: Vec::new(),
            index: 0,
            block_index: 0,
        };
        if begin < 0 && end < 0 {
            return iter;
        }

        // Seek compares against the raw bound, so the unbounded sentinel
        // starts at the oldest block.
        let Some(start) = container.blocks().position(|block| block.end_time() >= end) else {
            return iter;
        };
        iter.load(start);
        while iter.index + 1 < iter.times.len() && iter.times[iter.index + 1] <= begin {
            iter.index += 1;
        }
        iter
    }

    /// Decodes block `index` into scratch and points at its first sample.
    /// Marks the cursor exhausted if there is no such block.
    fn load(&mut self, index: usize) {
        self.block_index = index;
        self.index = 0;
        self.valid = match self.container.block(index) {
            Some(block) => block.decode_all(&mut self.times, &mut self.values) > 0,
            None => false,
        };
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Lower bound of the interval.
    pub fn begin(&self) -> i64 {
        self.begin
    }

    /// Upper bound of the interval, `i64::MAX` when unbounded.
    pub fn end(&self) -> i64 {
        self.end
    }

    /// Time of the current sample.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is exhausted.
    #[inline]
    pub fn time(&self) -> i64 {
        assert!(self.valid, "time() called on an exhausted range iterator");
        self.times[self.index]
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
        assert!(self.valid, "value() called on an exhausted range iterator");
        self.values[self.index]
    }

    /// Moves to the next sample, or exhausts the cursor once the current
    /// sample has reached the upper bound.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is already exhausted.
    pub fn advance(&mut self) {
        assert!(self.valid, "advance() called on an exhausted range iterator");

        if self.time() >= self.end {
            self.valid = false;
        } else if self.index + 1 < self.times.len() {
            self.index += 1;
        } else {
            self.load(self.block_index + 1);
        }
    }
}

impl<'a, B: Block> Iterator for RangeIter<'a, B> {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        if !self.valid {
            return None;
        }
        let sample = Sample::new(self.time(), self.value());
        self.advance();
        Some(sample)
    }
}

/// Two cursors are equal when both are exhausted, or both are live over the
/// same container. Position is not compared.
impl<'a, B> PartialEq for RangeIter<'a, B> {
    fn eq(&self, other: &Self) -> bool {
        match (self.valid, other.valid) {
            (true, true) => std::ptr::eq(self.container, other.container),
            (false, false) => true,
            _ => false,
        }
    }
}
