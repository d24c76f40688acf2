//! Field identifiers.
//!
//! `FieldId` names each of the eighteen fields of the pipeline record. The
//! qualified name (`D.IMM`) is the stage tag plus the harness field name; it is
//! what `Display`, `FromStr`, and serde use, so a [`FieldMap`] serialises to a
//! JSON object keyed the same way the harness header names its macros.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Stage;
use crate::common::CodecError;

/// Field name to value mapping, one entry per declared field.
pub type FieldMap = BTreeMap<FieldId, u64>;

/// A declared field of the pipeline record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldId {
    /// `F.PC`
    #[serde(rename = "F.PC")]
    FetchPc,
    /// `F.INSN`
    #[serde(rename = "F.INSN")]
    FetchInsn,
    /// `D.PC`
    #[serde(rename = "D.PC")]
    DecodePc,
    /// `D.OPCODE`
    #[serde(rename = "D.OPCODE")]
    DecodeOpcode,
    /// `D.RD`
    #[serde(rename = "D.RD")]
    DecodeRd,
    /// `D.RS1`
    #[serde(rename = "D.RS1")]
    DecodeRs1,
    /// `D.RS2`
    #[serde(rename = "D.RS2")]
    DecodeRs2,
    /// `D.FUNCT3`
    #[serde(rename = "D.FUNCT3")]
    DecodeFunct3,
    /// `D.FUNCT7`
    #[serde(rename = "D.FUNCT7")]
    DecodeFunct7,
    /// `D.IMM`
    #[serde(rename = "D.IMM")]
    DecodeImm,
    /// `D.SHAMT`
    #[serde(rename = "D.SHAMT")]
    DecodeShamt,
    /// `R.READ_RS1`
    #[serde(rename = "R.READ_RS1")]
    ReadRs1,
    /// `R.READ_RS2`
    #[serde(rename = "R.READ_RS2")]
    ReadRs2,
    /// `R.READ_RS1_DATA`
    #[serde(rename = "R.READ_RS1_DATA")]
    ReadRs1Data,
    /// `R.READ_RS2_DATA`
    #[serde(rename = "R.READ_RS2_DATA")]
    ReadRs2Data,
    /// `E.PC`
    #[serde(rename = "E.PC")]
    ExecutePc,
    /// `E.ALU_RES`
    #[serde(rename = "E.ALU_RES")]
    ExecuteAluRes,
    /// `E.BR_TAKEN`
    #[serde(rename = "E.BR_TAKEN")]
    ExecuteBrTaken,
}

impl FieldId {
    /// Number of declared fields.
    pub const COUNT: usize = 18;

    /// All fields, in slice order then offset order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::FetchPc,
        Self::FetchInsn,
        Self::DecodePc,
        Self::DecodeOpcode,
        Self::DecodeRd,
        Self::DecodeRs1,
        Self::DecodeRs2,
        Self::DecodeFunct3,
        Self::DecodeFunct7,
        Self::DecodeImm,
        Self::DecodeShamt,
        Self::ReadRs1,
        Self::ReadRs2,
        Self::ReadRs1Data,
        Self::ReadRs2Data,
        Self::ExecutePc,
        Self::ExecuteAluRes,
        Self::ExecuteBrTaken,
    ];

    /// Position in [`Self::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stage whose slice holds the field.
    pub const fn stage(self) -> Stage {
        match self {
            Self::FetchPc | Self::FetchInsn => Stage::Fetch,
            Self::DecodePc
            | Self::DecodeOpcode
            | Self::DecodeRd
            | Self::DecodeRs1
            | Self::DecodeRs2
            | Self::DecodeFunct3
            | Self::DecodeFunct7
            | Self::DecodeImm
            | Self::DecodeShamt => Stage::Decode,
            Self::ReadRs1 | Self::ReadRs2 | Self::ReadRs1Data | Self::ReadRs2Data => {
                Stage::RegisterRead
            }
            Self::ExecutePc | Self::ExecuteAluRes | Self::ExecuteBrTaken => Stage::Execute,
        }
    }

    /// Field name within its slice, as it appears in the layout table.
    pub const fn name(self) -> &'static str {
        match self {
            Self::FetchPc | Self::DecodePc | Self::ExecutePc => "PC",
            Self::FetchInsn => "INSN",
            Self::DecodeOpcode => "OPCODE",
            Self::DecodeRd => "RD",
            Self::DecodeRs1 => "RS1",
            Self::DecodeRs2 => "RS2",
            Self::DecodeFunct3 => "FUNCT3",
            Self::DecodeFunct7 => "FUNCT7",
            Self::DecodeImm => "IMM",
            Self::DecodeShamt => "SHAMT",
            Self::ReadRs1 => "READ_RS1",
            Self::ReadRs2 => "READ_RS2",
            Self::ReadRs1Data => "READ_RS1_DATA",
            Self::ReadRs2Data => "READ_RS2_DATA",
            Self::ExecuteAluRes => "ALU_RES",
            Self::ExecuteBrTaken => "BR_TAKEN",
        }
    }

    /// Finds the field declared as `name` in `stage`, ignoring ASCII case.
    pub fn lookup(stage: Stage, name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|id| id.stage() == stage && name.eq_ignore_ascii_case(id.name()))
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.stage().tag(), self.name())
    }
}

impl FromStr for FieldId {
    type Err = CodecError;

    /// Parses `D.IMM`, or the harness macro spelling `__D_IMM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (stage, field) = trimmed
            .split_once('.')
            .or_else(|| trimmed.strip_prefix("__").and_then(|m| m.split_once('_')))
            .unwrap_or((trimmed, ""));

        Stage::parse(stage)
            .and_then(|stage| Self::lookup(stage, field))
            .ok_or_else(|| CodecError::UnknownField {
                stage: stage.to_owned(),
                field: field.to_owned(),
            })
    }
}
