//! 512-bit trace record storage.
//!
//! `TraceBits` holds one packed record as eight little-endian 64-bit words:
//! word 0 carries bits 63:0 and word 7 carries bits 511:448. Field access goes
//! through [`BitSpan`], which may straddle two adjacent words.
//!
//! The text form is the one the simulation harness prints with `%h`: 128 hex
//! digits, most significant digit first.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};
use std::str::FromStr;

use super::error::ParseBitsError;
use super::span::BitSpan;

/// Width of a trace record in bits.
pub const RECORD_BITS: u32 = 512;

/// Width of a trace record in bytes.
pub const RECORD_BYTES: usize = (RECORD_BITS / u8::BITS) as usize;

/// Number of 64-bit storage words in a trace record.
pub const WORDS: usize = (RECORD_BITS / WORD_BITS) as usize;

/// Number of hex digits in the text form of a record.
pub const HEX_DIGITS: usize = RECORD_BYTES * 2;

const WORD_BITS: u32 = u64::BITS;

/// A packed 512-bit pipeline trace record.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TraceBits([u64; WORDS]);

impl TraceBits {
    /// Returns a record with every bit clear.
    pub const fn zero() -> Self {
        Self([0; WORDS])
    }

    /// Returns a record with every bit set.
    pub const fn ones() -> Self {
        Self([u64::MAX; WORDS])
    }

    /// Builds a record from storage words, least significant word first.
    pub const fn from_words(words: [u64; WORDS]) -> Self {
        Self(words)
    }

    /// Returns the storage words, least significant word first.
    pub const fn words(&self) -> &[u64; WORDS] {
        &self.0
    }

    /// Builds a record from bytes in little-endian order (byte 0 holds bits 7:0).
    pub fn from_le_bytes(bytes: [u8; RECORD_BYTES]) -> Self {
        let mut words = [0u64; WORDS];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(8)) {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            *word = u64::from_le_bytes(buf);
        }
        Self(words)
    }

    /// Returns the record as bytes in little-endian order.
    pub fn to_le_bytes(&self) -> [u8; RECORD_BYTES] {
        let mut bytes = [0u8; RECORD_BYTES];
        for (chunk, word) in bytes.chunks_exact_mut(8).zip(self.0) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        bytes
    }

    /// Builds a record from bytes in big-endian order (byte 0 holds bits 511:504).
    pub fn from_be_bytes(mut bytes: [u8; RECORD_BYTES]) -> Self {
        bytes.reverse();
        Self::from_le_bytes(bytes)
    }

    /// Returns the record as bytes in big-endian order.
    pub fn to_be_bytes(&self) -> [u8; RECORD_BYTES] {
        let mut bytes = self.to_le_bytes();
        bytes.reverse();
        bytes
    }

    /// Reads a single bit.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 512 or greater.
    #[inline]
    pub fn bit(&self, index: u32) -> bool {
        assert!(index < RECORD_BITS, "bit index {index} out of range");
        (self.0[(index / WORD_BITS) as usize] >> (index % WORD_BITS)) & 1 == 1
    }

    /// Writes a single bit.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 512 or greater.
    #[inline]
    pub fn set_bit(&mut self, index: u32, value: bool) {
        assert!(index < RECORD_BITS, "bit index {index} out of range");
        let word = &mut self.0[(index / WORD_BITS) as usize];
        let bit = 1u64 << (index % WORD_BITS);
        if value {
            *word |= bit;
        } else {
            *word &= !bit;
        }
    }

    /// Extracts the unsigned value stored in `span`.
    ///
    /// Computes `(B >> offset) & ((1 << width) - 1)` over the full 512-bit value,
    /// pulling the high part from the next word when the span crosses a word boundary.
    #[inline]
    pub fn extract(&self, span: BitSpan) -> u64 {
        let word = (span.offset() / WORD_BITS) as usize;
        let shift = span.offset() % WORD_BITS;
        let mut value = self.0[word] >> shift;
        if shift + span.width() > WORD_BITS {
            value |= self.0[word + 1] << (WORD_BITS - shift);
        }
        value & span.max_value()
    }

    /// Clears `span` and stores `value` in it.
    ///
    /// Bits of `value` above the span width are discarded. Callers that must
    /// not truncate check [`BitSpan::fits`] first.
    #[inline]
    pub fn insert(&mut self, span: BitSpan, value: u64) {
        let mask = span.max_value();
        let value = value & mask;
        let word = (span.offset() / WORD_BITS) as usize;
        let shift = span.offset() % WORD_BITS;

        self.0[word] = (self.0[word] & !(mask << shift)) | (value << shift);
        if shift + span.width() > WORD_BITS {
            let carried = WORD_BITS - shift;
            self.0[word + 1] = (self.0[word + 1] & !(mask >> carried)) | (value >> carried);
        }
    }

    /// Returns true if no bit is set.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&w| w == 0)
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> u32 {
        self.0.iter().map(|w| w.count_ones()).sum()
    }

    /// Index of the least significant set bit, if any.
    pub fn lowest_set_bit(&self) -> Option<u32> {
        self.0
            .iter()
            .zip(0u32..)
            .find(|&(&w, _)| w != 0)
            .map(|(&w, i)| i * WORD_BITS + w.trailing_zeros())
    }
}

impl BitAnd for TraceBits {
    type Output = Self;

    fn bitand(mut self, rhs: Self) -> Self {
        self &= rhs;
        self
    }
}

impl BitAndAssign for TraceBits {
    fn bitand_assign(&mut self, rhs: Self) {
        for (l, r) in self.0.iter_mut().zip(rhs.0) {
            *l &= r;
        }
    }
}

impl BitOr for TraceBits {
    type Output = Self;

    fn bitor(mut self, rhs: Self) -> Self {
        self |= rhs;
        self
    }
}

impl BitOrAssign for TraceBits {
    fn bitor_assign(&mut self, rhs: Self) {
        for (l, r) in self.0.iter_mut().zip(rhs.0) {
            *l |= r;
        }
    }
}

impl Not for TraceBits {
    type Output = Self;

    fn not(self) -> Self {
        Self(self.0.map(|w| !w))
    }
}

impl fmt::Display for TraceBits {
    /// Formats the record as 128 lowercase hex digits, most significant first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&hex::encode(self.to_be_bytes()))
    }
}

impl fmt::LowerHex for TraceBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        pad_hex(f, &hex::encode(self.to_be_bytes()))
    }
}

impl fmt::UpperHex for TraceBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        pad_hex(f, &hex::encode_upper(self.to_be_bytes()))
    }
}

/// Writes `digits`, with a `0x` prefix under `#`, honouring width and fill.
fn pad_hex(f: &mut fmt::Formatter<'_>, digits: &str) -> fmt::Result {
    if f.alternate() {
        f.pad(&format!("0x{digits}"))
    } else {
        f.pad(digits)
    }
}

impl fmt::Debug for TraceBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TraceBits({self:#x})")
    }
}

impl FromStr for TraceBits {
    type Err = ParseBitsError;

    /// Parses the harness hex form.
    ///
    /// Accepts an optional `0x` or `512'h` prefix and `_` digit separators.
    /// Shorter inputs are zero-extended on the left.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s
            .strip_prefix("512'h")
            .or_else(|| s.strip_prefix("0x"))
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let digits: String = s.chars().filter(|&c| c != '_').collect();

        if digits.is_empty() {
            return Err(ParseBitsError::Empty);
        }
        let count = digits.chars().count();
        if count > HEX_DIGITS {
            return Err(ParseBitsError::TooManyDigits { digits: count });
        }

        let padded = format!("{digits:0>width$}", width = HEX_DIGITS);
        let mut bytes = [0u8; RECORD_BYTES];
        hex::decode_to_slice(padded, &mut bytes)?;
        Ok(Self::from_be_bytes(bytes))
    }
}
