use crate::block::{Block, CompressedBlock, PlainBlock};
use crate::config::SeriesConfig;
use crate::container::Container;
use crate::error::Result;
use crate::iter::Iter;
use crate::range::RangeIter;

/// A series whose blocks are delta/XOR compressed.
pub type CompressedSeries = TimeSeries<CompressedBlock>;

/// A series whose blocks store samples verbatim.
pub type PlainSeries = TimeSeries<PlainBlock>;

/// An in-memory time series that keeps a trailing retention window.
///
/// Samples must arrive in increasing time order; anything at or before the
/// newest stored time is dropped. The block variant is chosen by `B`.
///
/// # Example
/// ```
/// use tsarray::CompressedSeries;
///
/// let mut series = CompressedSeries::new(1_000).unwrap();
/// series.append(100, 1.5);
/// series.append(200, -2.25);
/// series.append(150, 9.0); // dropped
///
/// let times: Vec<i64> = series.iter().map(|s| s.time).collect();
/// assert_eq!(times, vec![100, 200]);
/// ```
#[derive(Debug)]
pub struct TimeSeries<B> {
    container: Container<B>,
}

impl<B: Block> TimeSeries<B> {
    /// Creates an empty series keeping `window_millis` of history, with the
    /// default block size.
    pub fn new(window_millis: i64) -> Result<Self> {
        Self::with_config(SeriesConfig::new(window_millis))
    }

    pub fn with_config(config: SeriesConfig) -> Result<Self> {
        Ok(Self {
            container: Container::new(config)?,
        })
    }

    /// Appends a sample. Any f64, including NaN and infinities, is stored by
    /// bit pattern.
    pub fn append(&mut self, time: i64, value: f64) {
        self.container.append(time, value.to_bits());
    }

    /// Returns a cursor over every retained sample, oldest first.
    pub fn iter(&self) -> Iter<'_, B> {
        Iter::new(&self.container)
    }

    /// Returns a cursor over `[begin, end]`; a negative `end` is unbounded.
    /// `range(0, -1)` visits the same samples as [`iter`](Self::iter).
    pub fn range(&self, begin: i64, end: i64) -> RangeIter<'_, B> {
        RangeIter::new(&self.container, begin, end)
    }

    /// In-memory footprint of the stored samples in bytes.
    pub fn total_byte_size(&self) -> usize {
        self.container.total_byte_size()
    }

    pub fn block_count(&self) -> usize {
        self.container.block_count()
    }

    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }

    pub fn config(&self) -> &SeriesConfig {
        self.container.config()
    }

    pub fn container(&self) -> &Container<B> {
        &self.container
    }
}

impl<'a, B: Block> IntoIterator for &'a TimeSeries<B> {
    type Item = crate::block::Sample;
    type IntoIter = Iter<'a, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_new_validates_window() {
        assert_eq!(CompressedSeries::new(0).unwrap_err(), Error::InvalidWindow(0));
        assert!(PlainSeries::new(1).is_ok());
    }

    #[test]
    fn test_for_loop_over_reference() {
        let mut series = PlainSeries::new(1_000).unwrap();
        series.append(1, 10.0);
        series.append(2, 20.0);
        let mut sum = 0.0;
        for sample in &series {
            sum += sample.value;
        }
        assert_eq!(sum, 30.0);
    }

    #[test]
    fn test_accessors() {
        let config = SeriesConfig::new(500).with_block_size(64);
        let mut series = CompressedSeries::with_config(config).unwrap();
        assert!(series.is_empty());
        series.append(0, 1.0);
        assert!(!series.is_empty());
        assert_eq!(series.block_count(), 1);
        assert_eq!(series.config().block_size, 64);
        assert_eq!(series.container().block_count(), 1);
        assert_eq!(series.total_byte_size(), 16);
    }
}
