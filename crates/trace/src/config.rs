//! Codec configuration.
//!
//! The layout table is fixed; the only tunables are how strictly the codec
//! treats reserved bits and whether it emits a trace event per record.
//! Configuration is supplied as JSON by the verification harness, or use
//! `CodecConfig::default()`.

use serde::Deserialize;

use crate::common::CodecError;

/// Default configuration values.
mod defaults {
    use super::ReservedBits;

    /// Reserved bits are ignored on decode unless the harness asks otherwise.
    pub const RESERVED_BITS: ReservedBits = ReservedBits::Ignore;

    /// Per-record trace events are off; they dominate runtime on long traces.
    pub const TRACE_RECORDS: bool = false;
}

/// Policy for bits that lie outside every declared field.
///
/// Encoding always writes them as zero. This controls what
/// `PipelineRecordCodec::decode_checked` does when a record read back from the
/// simulator has any of them set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ReservedBits {
    /// Accept the record and drop the reserved bits.
    #[default]
    Ignore,
    /// Reject the record with `CodecError::ReservedBitsSet`.
    Reject,
}

/// Codec configuration.
///
/// # Examples
///
/// ```
/// use pd3_trace::config::{CodecConfig, ReservedBits};
///
/// let config = CodecConfig::from_json(r#"{ "reserved_bits": "Reject" }"#).unwrap();
/// assert_eq!(config.reserved_bits, ReservedBits::Reject);
/// assert!(!config.trace_records);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodecConfig {
    /// What strict decoding does with set reserved bits.
    #[serde(default = "CodecConfig::default_reserved_bits")]
    pub reserved_bits: ReservedBits,

    /// Emit a `trace`-level event with the packed record for every encode and decode.
    #[serde(default = "CodecConfig::default_trace_records")]
    pub trace_records: bool,
}

impl CodecConfig {
    const fn default_reserved_bits() -> ReservedBits {
        defaults::RESERVED_BITS
    }

    const fn default_trace_records() -> bool {
        defaults::TRACE_RECORDS
    }

    /// Parses a configuration from JSON. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Config`] if the JSON is malformed or not an object, names
    /// an unknown key, or holds a value of the wrong type.
    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| CodecError::Config(e.to_string()))?;
        // Derived struct impls also take a positional sequence; only objects are configs.
        if !value.is_object() {
            return Err(CodecError::Config("expected a JSON object".to_owned()));
        }
        serde_json::from_value(value).map_err(|e| CodecError::Config(e.to_string()))
    }

    /// Same configuration with reserved bits rejected on strict decode.
    #[must_use]
    pub const fn strict(self) -> Self {
        Self {
            reserved_bits: ReservedBits::Reject,
            ..self
        }
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            reserved_bits: defaults::RESERVED_BITS,
            trace_records: defaults::TRACE_RECORDS,
        }
    }
}
