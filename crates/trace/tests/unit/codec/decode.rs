//! # Decode Tests
//!
//! Decoding is total; strict decoding additionally polices reserved bits.

use pd3_trace::{CodecError, FieldId, TraceBits};
use pretty_assertions::assert_eq;

use crate::common::builder::RecordBuilder;
use crate::common::harness::{codec, strict_codec};

#[test]
fn test_decode_zero_record() {
    assert_eq!(
        codec().decode(&TraceBits::zero()),
        RecordBuilder::zeroed().build()
    );
}

#[test]
fn test_decode_all_ones_gives_every_field_its_max() {
    let decoded = codec().decode(&TraceBits::ones());

    assert_eq!(decoded.len(), FieldId::COUNT);
    assert_eq!(decoded, RecordBuilder::saturated().build());
    assert_eq!(decoded[&FieldId::DecodeOpcode], 0x7F);
    assert_eq!(decoded[&FieldId::ExecuteBrTaken], 1);
}

#[test]
fn test_decode_reads_verilog_hex_dump() {
    let codec = codec();

    let fetch: TraceBits = "0x13_8000_0010".parse().unwrap();
    let decoded = codec.decode(&fetch);
    assert_eq!(decoded[&FieldId::FetchPc], 0x8000_0010);
    assert_eq!(decoded[&FieldId::FetchInsn], 0x13);

    // Hex digit 112 holds absolute bit 448, E.BR_TAKEN.
    let taken: TraceBits = format!("512'h1{}", "0".repeat(112)).parse().unwrap();
    let decoded = codec.decode(&taken);
    assert_eq!(decoded[&FieldId::ExecuteBrTaken], 1);
    assert_eq!(decoded.values().sum::<u64>(), 1);
}

#[test]
fn test_decode_of_printed_record_round_trips() {
    let codec = codec();
    let fields = RecordBuilder::sample().build();
    let text = codec.encode(&fields).unwrap().to_string();

    let parsed: TraceBits = text.parse().unwrap();
    assert_eq!(codec.decode(&parsed), fields);
}

#[test]
fn test_default_decode_ignores_reserved_bits() {
    let codec = codec();
    let fields = RecordBuilder::sample().build();
    let noisy = codec.encode(&fields).unwrap() | codec.reserved_mask();

    assert_eq!(codec.decode(&noisy), fields);
    assert_eq!(codec.decode_checked(&noisy), Ok(fields));
}

#[test]
fn test_strict_decode_rejects_reserved_bit() {
    let codec = strict_codec();
    let mut bits = codec.encode(&RecordBuilder::sample().build()).unwrap();
    // First bit after F.INSN.
    bits.set_bit(64, true);

    assert_eq!(
        codec.decode_checked(&bits),
        Err(CodecError::ReservedBitsSet { bit: 64, count: 1 })
    );
    // The lenient path still decodes it.
    assert_eq!(codec.decode(&bits), RecordBuilder::sample().build());
}

#[test]
fn test_strict_decode_reports_lowest_reserved_bit_and_count() {
    let codec = strict_codec();
    let mut bits = TraceBits::zero();
    bits.set_bit(511, true);
    bits.set_bit(330, true);
    bits.set_bit(101 + 128, true);

    assert_eq!(
        codec.decode_checked(&bits),
        Err(CodecError::ReservedBitsSet { bit: 229, count: 3 })
    );
}

#[test]
fn test_strict_decode_accepts_encoded_records() {
    let codec = strict_codec();
    for fields in [
        RecordBuilder::zeroed().build(),
        RecordBuilder::sample().build(),
        RecordBuilder::saturated().build(),
    ] {
        let bits = codec.encode(&fields).unwrap();
        assert_eq!(codec.decode_checked(&bits), Ok(fields));
    }
}

#[test]
fn test_compare_lists_differing_fields() {
    let codec = codec();
    let expected = codec.encode(&RecordBuilder::sample().build()).unwrap();
    let mut actual = expected;
    codec.set_field(&mut actual, FieldId::ExecuteBrTaken, 0).unwrap();
    codec.set_field(&mut actual, FieldId::DecodeRd, 6).unwrap();

    let mismatches = codec.compare(&expected, &actual);
    let fields: Vec<FieldId> = mismatches.iter().map(|m| m.field).collect();
    assert_eq!(fields, [FieldId::DecodeRd, FieldId::ExecuteBrTaken]);
    assert_eq!(mismatches[0].expected, Some(5));
    assert_eq!(mismatches[0].actual, Some(6));

    // Reserved bits are not fields.
    assert!(codec.compare(&expected, &(expected | codec.reserved_mask())).is_empty());
}
