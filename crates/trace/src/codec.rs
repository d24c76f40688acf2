//! Pipeline record codec.
//!
//! Converts between a packed 512-bit [`TraceBits`] record and a [`FieldMap`]
//! (or the typed [`PipelineRecord`] view). The codec resolves every field's
//! absolute span from its layout once, at construction, after validating the
//! layout; per-record work is one mask-and-shift per field.
//!
//! A codec is immutable after construction and holds no per-record state, so
//! a single instance can be shared by any number of threads.

use tracing::{debug, trace, warn};

use crate::common::{BitSpan, CodecError, TraceBits};
use crate::config::{CodecConfig, ReservedBits};
use crate::diff::{self, FieldMismatch};
use crate::layout::{FieldId, FieldMap, PIPELINE_LAYOUT, TraceLayout};
use crate::record::PipelineRecord;

/// Encoder and decoder for pipeline trace records.
#[derive(Debug, Clone)]
pub struct PipelineRecordCodec<'a> {
    layout: &'a TraceLayout<'a>,
    /// Absolute span of each field, indexed by `FieldId::index`.
    spans: Vec<BitSpan>,
    reserved: TraceBits,
    config: CodecConfig,
}

impl PipelineRecordCodec<'static> {
    /// Builds a codec for [`PIPELINE_LAYOUT`] with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::LayoutInvariantViolation`] if the static layout is defective.
    pub fn new() -> Result<Self, CodecError> {
        Self::with_config(CodecConfig::default())
    }

    /// Builds a codec for [`PIPELINE_LAYOUT`].
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::LayoutInvariantViolation`] if the static layout is defective.
    pub fn with_config(config: CodecConfig) -> Result<Self, CodecError> {
        Self::with_layout(&PIPELINE_LAYOUT, config)
    }
}

impl<'a> PipelineRecordCodec<'a> {
    /// Builds a codec for an arbitrary layout.
    ///
    /// The layout is validated first and must declare every [`FieldId`].
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::LayoutInvariantViolation`] if the layout breaks an invariant,
    /// or [`CodecError::UnknownField`] if it lacks one of the pipeline fields.
    pub fn with_layout(layout: &'a TraceLayout<'a>, config: CodecConfig) -> Result<Self, CodecError> {
        layout.validate()?;

        let spans = FieldId::ALL
            .into_iter()
            .map(|id| layout.span(id.stage(), id.name()))
            .collect::<Result<Vec<_>, _>>()?;
        let reserved = layout.reserved_mask();

        debug!(
            version = layout.version,
            reserved_bits = reserved.count_ones(),
            "pipeline record codec ready"
        );

        Ok(Self {
            layout,
            spans,
            reserved,
            config,
        })
    }

    /// Layout the codec was built from.
    pub const fn layout(&self) -> &TraceLayout<'a> {
        self.layout
    }

    /// Active configuration.
    pub const fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Absolute span of a field.
    #[inline]
    pub fn span(&self, field: FieldId) -> BitSpan {
        self.spans[field.index()]
    }

    /// Mask of the bits outside every declared field.
    pub const fn reserved_mask(&self) -> TraceBits {
        self.reserved
    }

    /// Packs a complete field mapping into a record.
    ///
    /// Every bit outside the declared fields is zero.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::MissingField`] if a field has no entry, or
    /// [`CodecError::FieldOverflow`] if a value does not fit its field. Fields are
    /// checked in layout order and the first failure is reported.
    pub fn encode(&self, fields: &FieldMap) -> Result<TraceBits, CodecError> {
        let mut bits = TraceBits::zero();
        for id in FieldId::ALL {
            let value = fields
                .get(&id)
                .copied()
                .ok_or(CodecError::MissingField(id))?;
            self.store(&mut bits, id, value)?;
        }

        if self.config.trace_records {
            trace!(record = %bits, "encoded pipeline record");
        }
        Ok(bits)
    }

    /// Unpacks every declared field of a record.
    ///
    /// Total over all 512-bit inputs; reserved bits are ignored.
    pub fn decode(&self, bits: &TraceBits) -> FieldMap {
        if self.config.trace_records {
            trace!(record = %bits, "decoding pipeline record");
        }
        FieldId::ALL
            .into_iter()
            .map(|id| (id, bits.extract(self.span(id))))
            .collect()
    }

    /// Decodes a record, honouring the configured reserved-bit policy.
    ///
    /// # Errors
    ///
    /// With [`ReservedBits::Reject`], returns [`CodecError::ReservedBitsSet`] if any bit
    /// outside the declared fields is set.
    pub fn decode_checked(&self, bits: &TraceBits) -> Result<FieldMap, CodecError> {
        if self.config.reserved_bits == ReservedBits::Reject {
            let stale = *bits & self.reserved;
            if let Some(bit) = stale.lowest_set_bit() {
                let count = stale.count_ones();
                warn!(bit, count, "pipeline record has reserved bits set");
                return Err(CodecError::ReservedBitsSet { bit, count });
            }
        }
        Ok(self.decode(bits))
    }

    /// Reads one field of a record.
    #[inline]
    pub fn field(&self, bits: &TraceBits, field: FieldId) -> u64 {
        bits.extract(self.span(field))
    }

    /// Overwrites one field of a record, leaving every other bit untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::FieldOverflow`] if `value` does not fit the field; the
    /// record is not modified in that case.
    pub fn set_field(
        &self,
        bits: &mut TraceBits,
        field: FieldId,
        value: u64,
    ) -> Result<(), CodecError> {
        self.store(bits, field, value)
    }

    /// Packs a typed record.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::FieldOverflow`] if a member exceeds its field width,
    /// e.g. an `rd` of 32.
    pub fn encode_record(&self, record: &PipelineRecord) -> Result<TraceBits, CodecError> {
        self.encode(&record.to_fields())
    }

    /// Unpacks a record into its typed view.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::FieldOverflow`] only for layouts whose fields are wider than
    /// their [`PIPELINE_LAYOUT`] counterparts; never for [`PIPELINE_LAYOUT`] itself.
    pub fn decode_record(&self, bits: &TraceBits) -> Result<PipelineRecord, CodecError> {
        PipelineRecord::try_from(&self.decode(bits))
    }

    /// Looks up the slice-relative `(offset, width)` of a field; see
    /// [`TraceLayout::field_range`].
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnknownField`] if the stage or the field is not declared.
    pub fn field_range(&self, stage_name: &str, field_name: &str) -> Result<(u32, u32), CodecError> {
        self.layout.field_range(stage_name, field_name)
    }

    /// Re-runs the layout self-check.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::LayoutInvariantViolation`] if the layout is defective.
    pub fn validate_layout(&self) -> Result<(), CodecError> {
        self.layout.validate()
    }

    /// Decodes both records and lists the fields on which they differ.
    pub fn compare(&self, expected: &TraceBits, actual: &TraceBits) -> Vec<FieldMismatch> {
        diff::compare(&self.decode(expected), &self.decode(actual))
    }

    fn store(&self, bits: &mut TraceBits, field: FieldId, value: u64) -> Result<(), CodecError> {
        let span = self.span(field);
        if !span.fits(value) {
            return Err(CodecError::FieldOverflow {
                field,
                value,
                width: span.width(),
                max: span.max_value(),
            });
        }
        bits.insert(span, value);
        Ok(())
    }
}
