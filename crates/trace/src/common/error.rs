//! Codec error definitions.
//!
//! This module defines every failure the codec reports. It provides:
//! 1. **Codec Errors:** Input-driven failures of encode, lookup, and strict decode.
//! 2. **Layout Violations:** Defects in a layout table found by the validator.
//! 3. **Parse Errors:** Malformed hex text handed to `TraceBits::from_str`.
//!
//! All errors are deterministic. None of them is worth retrying.

use thiserror::Error;

use crate::layout::{FieldId, Stage};

/// Errors reported by the pipeline record codec.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A value handed to the encoder does not fit the declared width of its field.
    ///
    /// The encoder never truncates; the record is rejected instead.
    #[error("{field}: value {value:#x} does not fit {width} bits (max {max:#x})")]
    FieldOverflow {
        /// Field being encoded.
        field: FieldId,
        /// Offending value.
        value: u64,
        /// Declared width in bits.
        width: u32,
        /// Largest value the field can hold.
        max: u64,
    },

    /// A required field is absent from the mapping handed to the encoder.
    #[error("required field {0} is missing")]
    MissingField(FieldId),

    /// A stage or field name does not appear in the layout table.
    #[error("no field `{field}` declared in stage `{stage}`")]
    UnknownField {
        /// Stage name as supplied by the caller.
        stage: String,
        /// Field name as supplied by the caller.
        field: String,
    },

    /// The layout table itself is defective.
    ///
    /// This is fatal: a codec built on such a table cannot represent any record.
    #[error("trace layout invariant violated: {0}")]
    LayoutInvariantViolation(#[from] LayoutViolation),

    /// Strict decoding found bits set outside every declared field.
    #[error("{count} reserved bit(s) set, lowest at bit {bit}")]
    ReservedBitsSet {
        /// Absolute index of the lowest offending bit.
        bit: u32,
        /// Number of offending bits.
        count: u32,
    },

    /// The codec configuration could not be parsed.
    #[error("invalid codec configuration: {0}")]
    Config(String),
}

/// A single breach of the layout invariants.
///
/// Produced by `TraceLayout::violations`; the first one found is wrapped in
/// [`CodecError::LayoutInvariantViolation`] by `TraceLayout::validate`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutViolation {
    /// The record is wider than the 512-bit storage.
    #[error("record width {record_bits} exceeds the {capacity}-bit storage")]
    RecordTooWide {
        /// Declared record width.
        record_bits: u32,
        /// Storage capacity.
        capacity: u32,
    },

    /// Two slices are declared for the same stage.
    #[error("stage {0} is declared more than once")]
    DuplicateStage(Stage),

    /// A slice does not have the layout's slice width.
    #[error("slice {stage} is {width} bits wide, expected {expected}")]
    SliceWidth {
        /// Offending stage.
        stage: Stage,
        /// Declared slice width.
        width: u32,
        /// Width every slice must have.
        expected: u32,
    },

    /// Bits between the end of the previous slice and the start of this one belong to no slice.
    #[error("slice {stage} starts at bit {base}, leaving bits {expected_base}..{base} unassigned")]
    SliceGap {
        /// Stage whose slice starts late.
        stage: Stage,
        /// First unassigned bit.
        expected_base: u32,
        /// Declared base of the slice.
        base: u32,
    },

    /// A slice starts inside the previous one.
    #[error("slice {stage} at bit {base} overlaps slice {previous} ending at bit {previous_end}")]
    SliceOverlap {
        /// Stage whose slice starts early.
        stage: Stage,
        /// Declared base of the slice.
        base: u32,
        /// Stage of the slice it runs into.
        previous: Stage,
        /// One past the last bit of the previous slice.
        previous_end: u32,
    },

    /// The slices do not reach the end of the record.
    #[error("slices cover bits 0..{covered} of a {record_bits}-bit record")]
    Coverage {
        /// One past the last bit covered by any slice.
        covered: u32,
        /// Declared record width.
        record_bits: u32,
    },

    /// A field has zero width.
    #[error("{stage}.{field} has zero width")]
    EmptyField {
        /// Owning stage.
        stage: Stage,
        /// Field name.
        field: &'static str,
    },

    /// A field is wider than a `u64` value.
    #[error("{stage}.{field} is {width} bits wide, at most 64 are supported")]
    FieldTooWide {
        /// Owning stage.
        stage: Stage,
        /// Field name.
        field: &'static str,
        /// Declared width.
        width: u32,
    },

    /// A field extends past the end of its slice.
    #[error("{stage}.{field} at offset {offset} width {width} leaves its {slice_bits}-bit slice")]
    FieldOutOfSlice {
        /// Owning stage.
        stage: Stage,
        /// Field name.
        field: &'static str,
        /// Slice-relative offset.
        offset: u32,
        /// Declared width.
        width: u32,
        /// Width of the owning slice.
        slice_bits: u32,
    },

    /// Two fields of one slice share bits.
    #[error("{stage}.{field} overlaps {stage}.{other}")]
    FieldOverlap {
        /// Owning stage.
        stage: Stage,
        /// Field with the higher offset.
        field: &'static str,
        /// Field it runs into.
        other: &'static str,
    },

    /// A field name appears twice in one slice.
    #[error("{stage}.{field} is declared more than once")]
    DuplicateField {
        /// Owning stage.
        stage: Stage,
        /// Field name.
        field: &'static str,
    },
}

/// Errors from parsing the hex text form of a record.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ParseBitsError {
    /// No digits were supplied.
    #[error("empty trace record")]
    Empty,

    /// More than 128 hex digits were supplied.
    #[error("{digits} hex digits exceed the 128 of a 512-bit record")]
    TooManyDigits {
        /// Number of digits supplied.
        digits: usize,
    },

    /// A character is not a hex digit.
    #[error("malformed hex record: {0}")]
    Hex(#[from] hex::FromHexError),
}
