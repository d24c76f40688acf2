//! # Layout Table Tests
//!
//! Pins every field position against the harness header and checks name lookup.

use pd3_trace::CodecError;
use pd3_trace::layout::{
    FieldId, LAYOUT_VERSION, PIPELINE_LAYOUT, RECORD_BITS, SLICE_BITS, Stage, field_range, fields,
};
use rstest::rstest;

#[rstest]
#[case("F", "PC", 0, 32)]
#[case("F", "INSN", 32, 32)]
#[case("D", "PC", 0, 32)]
#[case("D", "OPCODE", 32, 7)]
#[case("D", "RD", 39, 5)]
#[case("D", "RS1", 44, 5)]
#[case("D", "RS2", 49, 5)]
#[case("D", "FUNCT3", 54, 3)]
#[case("D", "FUNCT7", 57, 7)]
#[case("D", "IMM", 64, 32)]
#[case("D", "SHAMT", 96, 5)]
#[case("R", "READ_RS1", 0, 5)]
#[case("R", "READ_RS2", 5, 5)]
#[case("R", "READ_RS1_DATA", 10, 32)]
#[case("R", "READ_RS2_DATA", 42, 32)]
#[case("E", "PC", 0, 32)]
#[case("E", "ALU_RES", 32, 32)]
#[case("E", "BR_TAKEN", 64, 1)]
fn test_field_range_matches_harness_header(
    #[case] stage: &str,
    #[case] field: &str,
    #[case] offset: u32,
    #[case] width: u32,
) {
    assert_eq!(field_range(stage, field), Ok((offset, width)));
}

#[rstest]
#[case::tag_lowercase("d", "imm")]
#[case::full_name("Decode", "IMM")]
#[case::hyphenated_name("register-read", "READ_RS2_DATA")]
fn test_field_range_accepts_stage_names(#[case] stage: &str, #[case] field: &str) {
    assert!(field_range(stage, field).is_ok());
}

#[rstest]
#[case::unknown_stage("W", "PC")]
#[case::unknown_field("D", "CSR")]
#[case::field_of_other_stage("F", "IMM")]
#[case::empty("", "")]
fn test_field_range_rejects_undeclared_names(#[case] stage: &str, #[case] field: &str) {
    assert_eq!(
        field_range(stage, field),
        Err(CodecError::UnknownField {
            stage: stage.to_owned(),
            field: field.to_owned(),
        })
    );
}

#[test]
fn test_slice_bases() {
    assert_eq!(fields::fetch::BASE, 0);
    assert_eq!(fields::decode::BASE, 128);
    assert_eq!(fields::register_read::BASE, 256);
    assert_eq!(fields::execute::BASE, 384);
    for stage in Stage::ALL {
        let slice = PIPELINE_LAYOUT.slice(stage).unwrap();
        assert_eq!(slice.width, SLICE_BITS);
        assert_eq!(slice.base, stage as u32 * SLICE_BITS);
    }
}

#[test]
fn test_layout_header() {
    assert_eq!(PIPELINE_LAYOUT.version, LAYOUT_VERSION);
    assert_eq!(PIPELINE_LAYOUT.record_bits, RECORD_BITS);
    assert_eq!(PIPELINE_LAYOUT.slices.len(), 4);
    assert_eq!(PIPELINE_LAYOUT.fields().count(), FieldId::COUNT);
}

#[test]
fn test_every_field_id_is_declared_in_its_stage() {
    for id in FieldId::ALL {
        let (offset, width) = field_range(id.stage().tag(), id.name()).unwrap();
        let span = PIPELINE_LAYOUT.span(id.stage(), id.name()).unwrap();
        let base = PIPELINE_LAYOUT.slice(id.stage()).unwrap().base;
        assert_eq!(span.offset(), base + offset, "{id}");
        assert_eq!(span.width(), width, "{id}");
    }
}

#[test]
fn test_field_id_order_matches_layout_order() {
    let from_layout: Vec<(Stage, &str)> = PIPELINE_LAYOUT
        .fields()
        .map(|(slice, field)| (slice.stage, field.name))
        .collect();
    let from_ids: Vec<(Stage, &str)> = FieldId::ALL.iter().map(|id| (id.stage(), id.name())).collect();
    assert_eq!(from_layout, from_ids);
}

#[test]
fn test_only_br_taken_is_a_flag() {
    let flags: Vec<&str> = PIPELINE_LAYOUT
        .fields()
        .filter(|(_, f)| f.is_flag())
        .map(|(_, f)| f.name)
        .collect();
    assert_eq!(flags, ["BR_TAKEN"]);
}

#[test]
fn test_reserved_mask_excludes_exactly_the_declared_fields() {
    let reserved = PIPELINE_LAYOUT.reserved_mask();
    let declared: u32 = PIPELINE_LAYOUT.fields().map(|(_, f)| f.width).sum();
    assert_eq!(declared, 64 + 101 + 74 + 65);
    assert_eq!(reserved.count_ones(), RECORD_BITS - declared);

    // F.INSN ends at bit 63; bit 64 of the Fetch slice is reserved.
    assert!(reserved.bit(64));
    assert!(!reserved.bit(63));
    // E.BR_TAKEN is absolute bit 448.
    assert!(!reserved.bit(448));
    assert!(reserved.bit(449));
}

#[test]
fn test_field_id_parse_and_display() {
    for id in FieldId::ALL {
        assert_eq!(id.to_string().parse::<FieldId>(), Ok(id));
    }
    assert_eq!(FieldId::ReadRs2Data.to_string(), "R.READ_RS2_DATA");
    assert!("D.NOPE".parse::<FieldId>().is_err());
    assert!("PC".parse::<FieldId>().is_err());
}
