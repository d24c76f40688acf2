//! Typed view of a pipeline trace record.
//!
//! `PipelineRecord` gives each stage slice its own struct with natural Rust
//! field types, so harness code can write `record.decode.imm` instead of
//! looking up `D.IMM` in a [`FieldMap`]. Conversion to and from a `FieldMap`
//! is lossless for every value the codec can encode.

use serde::{Deserialize, Serialize};

use crate::common::CodecError;
use crate::layout::{FieldId, FieldMap, PIPELINE_LAYOUT};

/// Fetch slice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FetchStage {
    /// Program counter of the fetched instruction.
    pub pc: u32,
    /// Raw instruction word.
    pub insn: u32,
}

/// Decode slice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecodeStage {
    /// Program counter of the decoded instruction.
    pub pc: u32,
    /// Major opcode (7 bits).
    pub opcode: u8,
    /// Destination register index (5 bits).
    pub rd: u8,
    /// First source register index (5 bits).
    pub rs1: u8,
    /// Second source register index (5 bits).
    pub rs2: u8,
    /// `funct3` (3 bits).
    pub funct3: u8,
    /// `funct7` (7 bits).
    pub funct7: u8,
    /// Immediate as an unsigned 32-bit pattern.
    pub imm: u32,
    /// Shift amount (5 bits).
    pub shamt: u8,
}

/// Register-read slice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegisterReadStage {
    /// Register index read for operand 1.
    pub read_rs1: u8,
    /// Register index read for operand 2.
    pub read_rs2: u8,
    /// Value read for operand 1.
    pub read_rs1_data: u32,
    /// Value read for operand 2.
    pub read_rs2_data: u32,
}

/// Execute slice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExecuteStage {
    /// Program counter of the executing instruction.
    pub pc: u32,
    /// ALU result.
    pub alu_res: u32,
    /// Whether the branch was taken.
    pub br_taken: bool,
}

/// One cycle's snapshot of the four pipeline stages.
///
/// The three program counters are independent: pipeline latency means they
/// normally differ within one record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PipelineRecord {
    /// Fetch slice.
    pub fetch: FetchStage,
    /// Decode slice.
    pub decode: DecodeStage,
    /// Register-read slice.
    pub register_read: RegisterReadStage,
    /// Execute slice.
    pub execute: ExecuteStage,
}

impl PipelineRecord {
    /// Flattens the record into a complete field mapping.
    ///
    /// Values are not checked against the layout widths here; the encoder does that.
    pub fn to_fields(&self) -> FieldMap {
        let Self {
            fetch,
            decode,
            register_read: read,
            execute,
        } = self;

        FieldMap::from([
            (FieldId::FetchPc, u64::from(fetch.pc)),
            (FieldId::FetchInsn, u64::from(fetch.insn)),
            (FieldId::DecodePc, u64::from(decode.pc)),
            (FieldId::DecodeOpcode, u64::from(decode.opcode)),
            (FieldId::DecodeRd, u64::from(decode.rd)),
            (FieldId::DecodeRs1, u64::from(decode.rs1)),
            (FieldId::DecodeRs2, u64::from(decode.rs2)),
            (FieldId::DecodeFunct3, u64::from(decode.funct3)),
            (FieldId::DecodeFunct7, u64::from(decode.funct7)),
            (FieldId::DecodeImm, u64::from(decode.imm)),
            (FieldId::DecodeShamt, u64::from(decode.shamt)),
            (FieldId::ReadRs1, u64::from(read.read_rs1)),
            (FieldId::ReadRs2, u64::from(read.read_rs2)),
            (FieldId::ReadRs1Data, u64::from(read.read_rs1_data)),
            (FieldId::ReadRs2Data, u64::from(read.read_rs2_data)),
            (FieldId::ExecutePc, u64::from(execute.pc)),
            (FieldId::ExecuteAluRes, u64::from(execute.alu_res)),
            (FieldId::ExecuteBrTaken, u64::from(execute.br_taken)),
        ])
    }
}

impl TryFrom<&FieldMap> for PipelineRecord {
    type Error = CodecError;

    /// Builds the typed view from a complete field mapping.
    ///
    /// Fails with `MissingField` for an absent field and `FieldOverflow` for a
    /// value wider than the field's declared width.
    fn try_from(fields: &FieldMap) -> Result<Self, Self::Error> {
        Ok(Self {
            fetch: FetchStage {
                pc: narrow(fields, FieldId::FetchPc)?,
                insn: narrow(fields, FieldId::FetchInsn)?,
            },
            decode: DecodeStage {
                pc: narrow(fields, FieldId::DecodePc)?,
                opcode: narrow(fields, FieldId::DecodeOpcode)?,
                rd: narrow(fields, FieldId::DecodeRd)?,
                rs1: narrow(fields, FieldId::DecodeRs1)?,
                rs2: narrow(fields, FieldId::DecodeRs2)?,
                funct3: narrow(fields, FieldId::DecodeFunct3)?,
                funct7: narrow(fields, FieldId::DecodeFunct7)?,
                imm: narrow(fields, FieldId::DecodeImm)?,
                shamt: narrow(fields, FieldId::DecodeShamt)?,
            },
            register_read: RegisterReadStage {
                read_rs1: narrow(fields, FieldId::ReadRs1)?,
                read_rs2: narrow(fields, FieldId::ReadRs2)?,
                read_rs1_data: narrow(fields, FieldId::ReadRs1Data)?,
                read_rs2_data: narrow(fields, FieldId::ReadRs2Data)?,
            },
            execute: ExecuteStage {
                pc: narrow(fields, FieldId::ExecutePc)?,
                alu_res: narrow(fields, FieldId::ExecuteAluRes)?,
                br_taken: flag(fields, FieldId::ExecuteBrTaken)?,
            },
        })
    }
}

impl TryFrom<FieldMap> for PipelineRecord {
    type Error = CodecError;

    fn try_from(fields: FieldMap) -> Result<Self, Self::Error> {
        Self::try_from(&fields)
    }
}

fn value(fields: &FieldMap, field: FieldId) -> Result<u64, CodecError> {
    fields
        .get(&field)
        .copied()
        .ok_or(CodecError::MissingField(field))
}

/// Reads a field and narrows it to its member type.
///
/// Values are checked against the field's width in [`PIPELINE_LAYOUT`], so an
/// overflow names the declared width (5 for `D.RD`), not the member type's.
fn narrow<T: TryFrom<u64>>(fields: &FieldMap, field: FieldId) -> Result<T, CodecError> {
    let value = value(fields, field)?;
    let span = PIPELINE_LAYOUT.span(field.stage(), field.name())?;
    span.fits(value)
        .then(|| T::try_from(value).ok())
        .flatten()
        .ok_or(CodecError::FieldOverflow {
            field,
            value,
            width: span.width(),
            max: span.max_value(),
        })
}

fn flag(fields: &FieldMap, field: FieldId) -> Result<bool, CodecError> {
    narrow::<u8>(fields, field).map(|bit| bit == 1)
}
