//! Pipeline trace record layout.
//!
//! The layout table is the one piece of configuration the codec has. It maps
//! each pipeline stage to a 128-bit slice of the record and each slice to an
//! ordered list of named fields. Encode, decode, name lookup, and validation
//! all derive their behaviour from [`PIPELINE_LAYOUT`].
//!
//! | Slice | Bits    | Stage         |
//! |-------|---------|---------------|
//! | F     | 127:0   | Fetch         |
//! | D     | 255:128 | Decode        |
//! | R     | 383:256 | Register-Read |
//! | E     | 511:384 | Execute       |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::{BitSpan, CodecError, TraceBits};

/// Stage slice field positions.
pub mod fields;

mod field_id;
mod validate;

pub use crate::common::RECORD_BITS;
pub use field_id::{FieldId, FieldMap};

/// Version of the layout table. Bump on any change to a constant in [`fields`].
pub const LAYOUT_VERSION: u32 = 1;

/// Width of one stage slice in bits.
pub const SLICE_BITS: u32 = 128;

/// A pipeline stage that owns one slice of the record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    /// Instruction fetch.
    #[serde(rename = "F")]
    Fetch,
    /// Instruction decode.
    #[serde(rename = "D")]
    Decode,
    /// Register-file read.
    #[serde(rename = "R")]
    RegisterRead,
    /// Execute.
    #[serde(rename = "E")]
    Execute,
}

impl Stage {
    /// All stages, in slice order.
    pub const ALL: [Self; 4] = [Self::Fetch, Self::Decode, Self::RegisterRead, Self::Execute];

    /// Single-letter tag used in field names (`F`, `D`, `R`, `E`).
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Fetch => "F",
            Self::Decode => "D",
            Self::RegisterRead => "R",
            Self::Execute => "E",
        }
    }

    /// Human-readable stage name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fetch => "Fetch",
            Self::Decode => "Decode",
            Self::RegisterRead => "Register-Read",
            Self::Execute => "Execute",
        }
    }

    /// Looks a stage up by tag or name, ignoring ASCII case.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|s| name.eq_ignore_ascii_case(s.tag()) || name.eq_ignore_ascii_case(s.name()))
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A named field within a slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldDef {
    /// Field name as it appears in the harness header, e.g. `READ_RS1_DATA`.
    pub name: &'static str,
    /// Offset of the least significant bit, relative to the slice base.
    pub offset: u32,
    /// Width in bits.
    pub width: u32,
}

impl FieldDef {
    /// Declares a field.
    pub const fn new(name: &'static str, offset: u32, width: u32) -> Self {
        Self {
            name,
            offset,
            width,
        }
    }

    /// `(offset, width)` pair, slice-relative.
    pub const fn range(&self) -> (u32, u32) {
        (self.offset, self.width)
    }

    /// One past the most significant bit, slice-relative.
    pub const fn end(&self) -> u32 {
        self.offset.saturating_add(self.width)
    }

    /// Single-bit fields carry a boolean.
    pub const fn is_flag(&self) -> bool {
        self.width == 1
    }
}

/// The slice of the record owned by one stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SliceLayout<'a> {
    /// Owning stage.
    pub stage: Stage,
    /// Absolute index of the slice's least significant bit.
    pub base: u32,
    /// Width in bits.
    pub width: u32,
    /// Fields in the slice.
    pub fields: &'a [FieldDef],
}

impl<'a> SliceLayout<'a> {
    /// Declares a slice.
    pub const fn new(stage: Stage, base: u32, width: u32, fields: &'a [FieldDef]) -> Self {
        Self {
            stage,
            base,
            width,
            fields,
        }
    }

    /// One past the slice's most significant bit.
    pub const fn end(&self) -> u32 {
        self.base.saturating_add(self.width)
    }

    /// Looks a field up by name, ignoring ASCII case.
    pub fn field(&self, name: &str) -> Option<&'a FieldDef> {
        let name = name.trim();
        self.fields.iter().find(|f| name.eq_ignore_ascii_case(f.name))
    }

    /// Absolute span of a field of this slice.
    ///
    /// Returns `None` if the field does not fit a valid record span.
    pub fn span_of(&self, field: &FieldDef) -> Option<BitSpan> {
        BitSpan::new(self.base.checked_add(field.offset)?, field.width)
    }
}

/// A complete record layout: slices and the fields within them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceLayout<'a> {
    /// Layout version, see [`LAYOUT_VERSION`].
    pub version: u32,
    /// Record width in bits.
    pub record_bits: u32,
    /// Width every slice must have.
    pub slice_bits: u32,
    /// Slices, normally in ascending base order.
    pub slices: &'a [SliceLayout<'a>],
}

const PIPELINE_SLICES: [SliceLayout<'static>; 4] = [
    SliceLayout::new(Stage::Fetch, fields::fetch::BASE, SLICE_BITS, &fields::FETCH_FIELDS),
    SliceLayout::new(Stage::Decode, fields::decode::BASE, SLICE_BITS, &fields::DECODE_FIELDS),
    SliceLayout::new(
        Stage::RegisterRead,
        fields::register_read::BASE,
        SLICE_BITS,
        &fields::REGISTER_READ_FIELDS,
    ),
    SliceLayout::new(Stage::Execute, fields::execute::BASE, SLICE_BITS, &fields::EXECUTE_FIELDS),
];

/// The pipeline trace record layout.
pub static PIPELINE_LAYOUT: TraceLayout<'static> = TraceLayout {
    version: LAYOUT_VERSION,
    record_bits: RECORD_BITS,
    slice_bits: SLICE_BITS,
    slices: &PIPELINE_SLICES,
};

impl<'a> TraceLayout<'a> {
    /// Slice owned by `stage`, if declared.
    pub fn slice(&self, stage: Stage) -> Option<&SliceLayout<'a>> {
        self.slices.iter().find(|s| s.stage == stage)
    }

    /// Every field with its owning slice, in slice order then field order.
    pub fn fields(&self) -> impl Iterator<Item = (&SliceLayout<'a>, &'a FieldDef)> + '_ {
        self.slices
            .iter()
            .flat_map(|slice| slice.fields.iter().map(move |field| (slice, field)))
    }

    /// Looks up the slice-relative `(offset, width)` of a field by stage and field name.
    ///
    /// The stage may be given by tag (`"D"`) or name (`"Decode"`); both lookups ignore
    /// ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnknownField`] if the stage or the field is not declared.
    pub fn field_range(&self, stage_name: &str, field_name: &str) -> Result<(u32, u32), CodecError> {
        Stage::parse(stage_name)
            .and_then(|stage| self.slice(stage))
            .and_then(|slice| slice.field(field_name))
            .map(FieldDef::range)
            .ok_or_else(|| CodecError::UnknownField {
                stage: stage_name.to_owned(),
                field: field_name.to_owned(),
            })
    }

    /// Absolute span of a field.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnknownField`] if the field is not declared for `stage`
    /// or its declared position lies outside the record.
    pub fn span(&self, stage: Stage, field_name: &str) -> Result<BitSpan, CodecError> {
        self.slice(stage)
            .and_then(|slice| slice.field(field_name).and_then(|f| slice.span_of(f)))
            .ok_or_else(|| CodecError::UnknownField {
                stage: stage.tag().to_owned(),
                field: field_name.to_owned(),
            })
    }

    /// Mask of the bits that belong to no declared field.
    ///
    /// These bits are zero in every encoded record.
    pub fn reserved_mask(&self) -> TraceBits {
        let used = self
            .fields()
            .filter_map(|(slice, field)| slice.span_of(field))
            .fold(TraceBits::zero(), |acc, span| acc | span.mask());
        !used
    }
}

/// Looks up a field of [`PIPELINE_LAYOUT`]; see [`TraceLayout::field_range`].
///
/// # Errors
///
/// Returns [`CodecError::UnknownField`] if the stage or the field is not declared.
pub fn field_range(stage_name: &str, field_name: &str) -> Result<(u32, u32), CodecError> {
    PIPELINE_LAYOUT.field_range(stage_name, field_name)
}

/// Checks [`PIPELINE_LAYOUT`]; see [`TraceLayout::validate`].
///
/// # Errors
///
/// Returns [`CodecError::LayoutInvariantViolation`] describing the first defect found.
pub fn validate_layout() -> Result<(), CodecError> {
    PIPELINE_LAYOUT.validate()
}
