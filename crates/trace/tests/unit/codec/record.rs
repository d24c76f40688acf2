//! # Typed Record Tests

use pd3_trace::record::{DecodeStage, ExecuteStage, FetchStage, RegisterReadStage};
use pd3_trace::{CodecError, FieldId, FieldMap, PipelineRecord};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::builder::RecordBuilder;
use crate::common::harness::codec;

fn sample() -> PipelineRecord {
    PipelineRecord {
        fetch: FetchStage {
            pc: 0x8000_0010,
            insn: 0x13,
        },
        decode: DecodeStage {
            pc: 0x8000_000C,
            opcode: 0x13,
            rd: 5,
            rs1: 6,
            rs2: 31,
            funct3: 0,
            funct7: 0x7F,
            imm: 0xFFFF_FFFF,
            shamt: 31,
        },
        register_read: RegisterReadStage {
            read_rs1: 3,
            read_rs2: 4,
            read_rs1_data: 0x1234_5678,
            read_rs2_data: 0xDEAD_BEEF,
        },
        execute: ExecuteStage {
            pc: 0x8000_0004,
            alu_res: 0x2A,
            br_taken: true,
        },
    }
}

#[test]
fn test_typed_record_matches_field_map() {
    assert_eq!(sample().to_fields(), RecordBuilder::sample().build());
    assert_eq!(
        PipelineRecord::try_from(RecordBuilder::sample().build()),
        Ok(sample())
    );
}

#[test]
fn test_typed_record_round_trip() {
    let codec = codec();
    let bits = codec.encode_record(&sample()).unwrap();
    assert_eq!(bits, codec.encode(&RecordBuilder::sample().build()).unwrap());
    assert_eq!(codec.decode_record(&bits), Ok(sample()));
}

#[test]
fn test_typed_record_rd_32_overflows_field() {
    let mut record = sample();
    record.decode.rd = 32;
    assert_eq!(
        codec().encode_record(&record),
        Err(CodecError::FieldOverflow {
            field: FieldId::DecodeRd,
            value: 32,
            width: 5,
            max: 31,
        })
    );
}

#[test]
fn test_try_from_missing_field() {
    let fields = RecordBuilder::sample().without(FieldId::ReadRs2Data).build();
    assert_eq!(
        PipelineRecord::try_from(&fields),
        Err(CodecError::MissingField(FieldId::ReadRs2Data))
    );
}

#[test]
fn test_try_from_rejects_non_boolean_flag() {
    let fields = RecordBuilder::sample().set(FieldId::ExecuteBrTaken, 2).build();
    assert_eq!(
        PipelineRecord::try_from(&fields),
        Err(CodecError::FieldOverflow {
            field: FieldId::ExecuteBrTaken,
            value: 2,
            width: 1,
            max: 1,
        })
    );
}

#[rstest]
#[case::fits_member_not_field(0x20)]
#[case::wider_than_member(0x100)]
fn test_try_from_reports_declared_field_width(#[case] value: u64) {
    let fields = RecordBuilder::sample().set(FieldId::DecodeRd, value).build();
    let err = PipelineRecord::try_from(&fields).unwrap_err();
    assert_eq!(
        err,
        CodecError::FieldOverflow {
            field: FieldId::DecodeRd,
            value,
            width: 5,
            max: 0x1F,
        }
    );
    assert!(err.to_string().contains("does not fit 5 bits"), "{err}");
}

#[test]
fn test_field_map_json_uses_qualified_names() {
    let fields = RecordBuilder::zeroed()
        .set(FieldId::DecodeImm, 16)
        .build();
    let json = serde_json::to_value(&fields).unwrap();

    assert_eq!(json["D.IMM"], 16);
    assert_eq!(json["E.BR_TAKEN"], 0);
    assert_eq!(json.as_object().unwrap().len(), FieldId::COUNT);

    let back: FieldMap = serde_json::from_value(json).unwrap();
    assert_eq!(back, fields);
}

#[test]
fn test_typed_record_json_round_trip() {
    let json = serde_json::to_string(&sample()).unwrap();
    assert!(json.contains("\"br_taken\":true"));
    let back: PipelineRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, sample());
}
