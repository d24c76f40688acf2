//! Bit spans.
//!
//! A `BitSpan` names a contiguous run of bits inside a 512-bit record using
//! little-endian bit numbering (bit 0 is the least significant bit of word 0).
//! Spans are at most 64 bits wide so that a field value always fits a `u64`,
//! but they may start anywhere and cross a 64-bit word boundary.

use std::fmt;

use super::bits::{RECORD_BITS, TraceBits};

/// A validated `(offset, width)` range within a trace record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitSpan {
    offset: u32,
    width: u32,
}

impl BitSpan {
    /// Widest span a single field value may occupy.
    pub const MAX_WIDTH: u32 = u64::BITS;

    /// Creates a span starting at absolute bit `offset` and covering `width` bits.
    ///
    /// Returns `None` if the width is zero, wider than [`Self::MAX_WIDTH`], or the
    /// span would extend past bit 511.
    pub const fn new(offset: u32, width: u32) -> Option<Self> {
        if width == 0 || width > Self::MAX_WIDTH {
            return None;
        }
        match offset.checked_add(width) {
            Some(end) if end <= RECORD_BITS => Some(Self { offset, width }),
            _ => None,
        }
    }

    /// Absolute offset of the least significant bit.
    #[inline]
    pub const fn offset(self) -> u32 {
        self.offset
    }

    /// Number of bits covered.
    #[inline]
    pub const fn width(self) -> u32 {
        self.width
    }

    /// One past the most significant bit.
    #[inline]
    pub const fn end(self) -> u32 {
        self.offset + self.width
    }

    /// Largest unsigned value representable in this span.
    #[inline]
    pub const fn max_value(self) -> u64 {
        if self.width == Self::MAX_WIDTH {
            u64::MAX
        } else {
            (1u64 << self.width) - 1
        }
    }

    /// Returns true if `value` can be stored without losing bits.
    #[inline]
    pub const fn fits(self, value: u64) -> bool {
        value <= self.max_value()
    }

    /// Returns true if the two spans share at least one bit.
    #[inline]
    pub const fn overlaps(self, other: Self) -> bool {
        self.offset < other.end() && other.offset < self.end()
    }

    /// Returns true if the span crosses a 64-bit storage word boundary.
    #[inline]
    pub const fn crosses_word(self) -> bool {
        self.offset / u64::BITS != (self.end() - 1) / u64::BITS
    }

    /// Record-wide mask with exactly the bits of this span set.
    pub fn mask(self) -> TraceBits {
        let mut mask = TraceBits::zero();
        mask.insert(self, u64::MAX);
        mask
    }
}

impl fmt::Display for BitSpan {
    /// Formats the span as an inclusive Verilog part-select, e.g. `[223:192]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}]", self.end() - 1, self.offset)
    }
}
