//! Per-call codec configuration.

use core::ops::{Bound, RangeBounds};

/// Order in which bits are packed within and across byte boundaries.
///
/// The order never changes which bits belong to a value, only where they land on the wire.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum ByteOrder {
    /// The most significant bit of each value is transmitted first and lands in the
    /// highest free bit of the current byte.
    #[default]
    MsbFirst,

    /// The least significant bit of each value is transmitted first and lands in the
    /// lowest free bit of the current byte.
    LsbFirst,
}

/// Bounds the element count accepted when decoding a length-prefixed collection.
///
/// # Examples
///
/// ```
/// use bitlayout_codec::RangeCfg;
///
/// let cfg = RangeCfg::new(0..=1024);
/// assert!(cfg.contains(500));
/// assert!(!cfg.contains(2000));
///
/// let cfg: RangeCfg = (1..).into();
/// assert!(!cfg.contains(0));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct RangeCfg {
    start: Bound<usize>,
    end: Bound<usize>,
}

impl RangeCfg {
    /// Creates a new `RangeCfg` from any range of `usize`.
    pub fn new(r: impl RangeBounds<usize>) -> Self {
        Self {
            start: r.start_bound().cloned(),
            end: r.end_bound().cloned(),
        }
    }

    /// Creates a `RangeCfg` that only accepts exactly `len`.
    pub fn exact(len: usize) -> Self {
        Self {
            start: Bound::Included(len),
            end: Bound::Included(len),
        }
    }

    /// Returns true if `len` is within this range.
    pub fn contains(&self, len: usize) -> bool {
        match self.start {
            Bound::Included(s) if len < s => return false,
            Bound::Excluded(s) if len <= s => return false,
            _ => {}
        }
        match self.end {
            Bound::Included(e) if len > e => return false,
            Bound::Excluded(e) if len >= e => return false,
            _ => {}
        }
        true
    }
}

impl Default for RangeCfg {
    fn default() -> Self {
        Self::new(..)
    }
}

macro_rules! impl_range_from {
    ($($range:ty),*) => {
        $(
            impl From<$range> for RangeCfg {
                fn from(r: $range) -> Self {
                    Self::new(r)
                }
            }
        )*
    };
}

impl_range_from!(
    core::ops::Range<usize>,
    core::ops::RangeInclusive<usize>,
    core::ops::RangeFrom<usize>,
    core::ops::RangeTo<usize>,
    core::ops::RangeToInclusive<usize>,
    core::ops::RangeFull
);

/// Settings applied uniformly to every value transcoded during one call.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Config {
    /// Bit order used for every primitive.
    pub order: ByteOrder,

    /// Accepted element counts for resizable collections (decode only).
    pub len: RangeCfg,
}

impl Config {
    /// Creates a configuration with the given order and no length limit.
    pub fn new(order: ByteOrder) -> Self {
        Self {
            order,
            len: RangeCfg::default(),
        }
    }

    /// Replaces the byte order.
    pub fn with_order(mut self, order: ByteOrder) -> Self {
        self.order = order;
        self
    }

    /// Replaces the accepted collection length range.
    pub fn with_len(mut self, len: impl Into<RangeCfg>) -> Self {
        self.len = len.into();
        self
    }
}

impl From<ByteOrder> for Config {
    fn from(order: ByteOrder) -> Self {
        Self::new(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::ops::Bound::{Excluded, Included, Unbounded};

    #[test]
    fn test_range_cfg_from() {
        let full: RangeCfg = (..).into();
        assert_eq!((full.start, full.end), (Unbounded, Unbounded));

        let from: RangeCfg = (5..).into();
        assert_eq!((from.start, from.end), (Included(5), Unbounded));

        let to: RangeCfg = (..10).into();
        assert_eq!((to.start, to.end), (Unbounded, Excluded(10)));

        let bounded: RangeCfg = (5..=10).into();
        assert_eq!((bounded.start, bounded.end), (Included(5), Included(10)));
    }

    #[test]
    fn test_range_cfg_contains() {
        let unbounded = RangeCfg::default();
        assert!(unbounded.contains(0));
        assert!(unbounded.contains(usize::MAX));

        let half_open: RangeCfg = (5..10).into();
        assert!(!half_open.contains(4));
        assert!(half_open.contains(5));
        assert!(half_open.contains(9));
        assert!(!half_open.contains(10));

        let exclusive_start = RangeCfg {
            start: Excluded(5),
            end: Included(10),
        };
        assert!(!exclusive_start.contains(5));
        assert!(exclusive_start.contains(6));
        assert!(exclusive_start.contains(10));
        assert!(!exclusive_start.contains(11));
    }

    #[test]
    fn test_range_cfg_exact() {
        let cfg = RangeCfg::exact(3);
        assert!(!cfg.contains(2));
        assert!(cfg.contains(3));
        assert!(!cfg.contains(4));
    }

    #[test]
    fn test_empty_range() {
        let empty: RangeCfg = (5..5).into();
        assert!(!empty.contains(5));

        #[allow(clippy::reversed_empty_ranges)]
        let reversed: RangeCfg = (6..=5).into();
        assert!(!reversed.contains(5));
        assert!(!reversed.contains(6));
    }

    #[test]
    fn test_config_builders() {
        let cfg = Config::default();
        assert_eq!(cfg.order, ByteOrder::MsbFirst);
        assert!(cfg.len.contains(usize::MAX));

        let cfg = Config::new(ByteOrder::LsbFirst).with_len(..=16);
        assert_eq!(cfg.order, ByteOrder::LsbFirst);
        assert!(cfg.len.contains(16));
        assert!(!cfg.len.contains(17));

        let cfg: Config = ByteOrder::LsbFirst.into();
        assert_eq!(cfg.with_order(ByteOrder::MsbFirst).order, ByteOrder::MsbFirst);
    }
}
