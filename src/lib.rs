//! # tsarray
//!
//! An in-memory, append-only store for time-stamped `f64` samples that keeps
//! only a trailing retention window.
//!
//! ## Storage overview
//!
//! - Samples are grouped into fixed-capacity **blocks**. A
//!   [`CompressedBlock`] keeps its first sample verbatim and every later one
//!   as a byte-packed record: the time delta in 1 to 4 bytes and the XOR with
//!   the previous value with its trailing zero bytes dropped. A
//!   [`PlainBlock`] keeps every sample verbatim.
//!
//! - Blocks live in a growable [`RingBuffer`] owned by a [`Container`], which
//!   routes every sample to the newest block and drops whole blocks once they
//!   fall out of the retention window. The newest block is always kept.
//!
//! - Reads go through [`Iter`] (everything, oldest first) or [`RangeIter`]
//!   (a time interval). Both borrow the series, so it cannot change while
//!   they are alive.
//!
//! ## Example
//!
//! ```rust
//! use tsarray::{CompressedSeries, PlainSeries};
//!
//! let mut series = CompressedSeries::new(60_000).unwrap();
//! for i in 0..1_000 {
//!     series.append(1_700_000_000_000 + i * 100, 20.0 + (i % 8) as f64 * 0.25);
//! }
//!
//! assert_eq!(series.iter().count(), 1_000);
//! assert!(series.total_byte_size() < 16 * 1_000);
//!
//! let window: Vec<f64> = series
//!     .range(1_700_000_000_000, 1_700_000_000_300)
//!     .map(|s| s.value)
//!     .collect();
//! assert_eq!(window, vec![20.0, 20.25, 20.5, 20.75]);
//!
//! let mut plain = PlainSeries::new(60_000).unwrap();
//! plain.append(1, 1.0);
//! assert_eq!(plain.total_byte_size(), 16);
//! ```

pub mod block;
pub mod bytebuffer;
pub mod config;
pub mod container;
pub mod error;
pub mod iter;
pub mod range;
pub mod ring;
pub mod series;

// Re-export primary types at the crate root.
pub use block::{Block, CompressedBlock, PlainBlock, Sample};
pub use bytebuffer::BlockFull;
pub use config::{SeriesConfig, DEFAULT_BLOCK_SIZE};
pub use container::Container;
pub use error::{Error, Result};
pub use iter::Iter;
pub use range::RangeIter;
pub use ring::RingBuffer;
pub use series::{CompressedSeries, PlainSeries, TimeSeries};
