//! Common types shared by the layout table and the codec.
//!
//! This module provides the value-level building blocks of a trace record:
//! 1. **Bit Vector:** `TraceBits`, the 512-bit packed record with word-spanning field access.
//! 2. **Spans:** `BitSpan`, a validated `(offset, width)` range inside the record.
//! 3. **Error Handling:** Codec, layout, and text-parsing error types.

/// 512-bit packed record storage and hex text form.
pub mod bits;

/// Error types for encoding, decoding, layout validation, and parsing.
pub mod error;

/// Validated bit ranges within a record.
pub mod span;

pub use bits::{RECORD_BITS, RECORD_BYTES, TraceBits, WORDS};
pub use error::{CodecError, LayoutViolation, ParseBitsError};
pub use span::BitSpan;
