//! Pipeline trace record codec for the pd3 verification harness.
//!
//! Each simulated cycle the RTL dumps a 512-bit snapshot of its pipeline, which
//! the scoreboard checks against the reference model. This crate owns the bit
//! layout of that snapshot and the code that packs and unpacks it:
//! 1. **Layout:** The static stage → field table, its constants, and its self-check.
//! 2. **Codec:** Encode, decode, strict decode, single-field access, and name lookup.
//! 3. **Record:** A typed per-stage view of a decoded snapshot.
//! 4. **Diff:** Field-by-field comparison of two snapshots.
//! 5. **Common:** The 512-bit value type, bit spans, and error types.
//!
//! # Example
//!
//! ```
//! use pd3_trace::{FieldId, PipelineRecord, PipelineRecordCodec};
//!
//! let codec = PipelineRecordCodec::new()?;
//!
//! let mut record = PipelineRecord::default();
//! record.fetch.pc = 0x8000_0010;
//! record.decode.imm = 0xFFFF_FFFF;
//! record.execute.br_taken = true;
//!
//! let bits = codec.encode_record(&record)?;
//! assert_eq!(codec.field(&bits, FieldId::DecodeImm), 0xFFFF_FFFF);
//! assert_eq!(codec.decode_record(&bits)?, record);
//! # Ok::<(), pd3_trace::CodecError>(())
//! ```

/// Bit vector, spans, and error types.
pub mod common;
/// Codec configuration (reserved-bit policy, per-record tracing).
pub mod config;
/// Encoder and decoder.
pub mod codec;
/// Field-equality comparison.
pub mod diff;
/// Layout table and validation.
pub mod layout;
/// Typed record view.
pub mod record;

/// Codec error type; every fallible operation returns it.
pub use crate::common::CodecError;
/// Packed 512-bit record.
pub use crate::common::TraceBits;
/// Codec configuration; use `CodecConfig::default()` or `CodecConfig::from_json`.
pub use crate::config::CodecConfig;
/// The codec; build with `PipelineRecordCodec::new`.
pub use crate::codec::PipelineRecordCodec;
/// Field identifiers and the name → value mapping the codec speaks.
pub use crate::layout::{FieldId, FieldMap, PIPELINE_LAYOUT};
/// Typed record view.
pub use crate::record::PipelineRecord;
