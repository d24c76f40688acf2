//! Pipeline trace record field positions.
//!
//! Offsets are relative to the base bit of the owning slice. Each block mirrors
//! one `__<STAGE>_*` group of the verification harness header, so a change on
//! the RTL side is a change to exactly one constant here.

use super::FieldDef;

/// Fetch slice, record bits 127:0.
pub mod fetch {
    /// Base bit of the slice.
    pub const BASE: u32 = 0;

    /// Program counter of the fetched instruction (bits 31:0).
    pub const PC_OFFSET: u32 = 0;
    /// Width of `PC`.
    pub const PC_WIDTH: u32 = 32;

    /// Raw fetched instruction word (bits 63:32).
    pub const INSN_OFFSET: u32 = 32;
    /// Width of `INSN`.
    pub const INSN_WIDTH: u32 = 32;
}

/// Decode slice, record bits 255:128.
pub mod decode {
    /// Base bit of the slice.
    pub const BASE: u32 = 128;

    /// Program counter of the decoded instruction (bits 31:0).
    pub const PC_OFFSET: u32 = 0;
    /// Width of `PC`.
    pub const PC_WIDTH: u32 = 32;

    /// Major opcode (bits 38:32).
    pub const OPCODE_OFFSET: u32 = 32;
    /// Width of `OPCODE`.
    pub const OPCODE_WIDTH: u32 = 7;

    /// Destination register index (bits 43:39).
    pub const RD_OFFSET: u32 = 39;
    /// Width of `RD`.
    pub const RD_WIDTH: u32 = 5;

    /// First source register index (bits 48:44).
    pub const RS1_OFFSET: u32 = 44;
    /// Width of `RS1`.
    pub const RS1_WIDTH: u32 = 5;

    /// Second source register index (bits 53:49).
    pub const RS2_OFFSET: u32 = 49;
    /// Width of `RS2`.
    pub const RS2_WIDTH: u32 = 5;

    /// `funct3` minor opcode (bits 56:54).
    pub const FUNCT3_OFFSET: u32 = 54;
    /// Width of `FUNCT3`.
    pub const FUNCT3_WIDTH: u32 = 3;

    /// `funct7` minor opcode (bits 63:57).
    pub const FUNCT7_OFFSET: u32 = 57;
    /// Width of `FUNCT7`.
    pub const FUNCT7_WIDTH: u32 = 7;

    /// Immediate as produced by the decoder (bits 95:64).
    pub const IMM_OFFSET: u32 = 64;
    /// Width of `IMM`.
    pub const IMM_WIDTH: u32 = 32;

    /// Shift amount (bits 100:96).
    pub const SHAMT_OFFSET: u32 = 96;
    /// Width of `SHAMT`.
    pub const SHAMT_WIDTH: u32 = 5;
}

/// Register-read slice, record bits 383:256.
pub mod register_read {
    /// Base bit of the slice.
    pub const BASE: u32 = 256;

    /// Register index read for operand 1 (bits 4:0).
    pub const READ_RS1_OFFSET: u32 = 0;
    /// Width of `READ_RS1`.
    pub const READ_RS1_WIDTH: u32 = 5;

    /// Register index read for operand 2 (bits 9:5).
    pub const READ_RS2_OFFSET: u32 = 5;
    /// Width of `READ_RS2`.
    pub const READ_RS2_WIDTH: u32 = 5;

    /// Value read for operand 1 (bits 41:10).
    pub const READ_RS1_DATA_OFFSET: u32 = 10;
    /// Width of `READ_RS1_DATA`.
    pub const READ_RS1_DATA_WIDTH: u32 = 32;

    /// Value read for operand 2 (bits 73:42).
    pub const READ_RS2_DATA_OFFSET: u32 = 42;
    /// Width of `READ_RS2_DATA`.
    pub const READ_RS2_DATA_WIDTH: u32 = 32;
}

/// Execute slice, record bits 511:384.
pub mod execute {
    /// Base bit of the slice.
    pub const BASE: u32 = 384;

    /// Program counter of the executing instruction (bits 31:0).
    pub const PC_OFFSET: u32 = 0;
    /// Width of `PC`.
    pub const PC_WIDTH: u32 = 32;

    /// ALU result (bits 63:32).
    pub const ALU_RES_OFFSET: u32 = 32;
    /// Width of `ALU_RES`.
    pub const ALU_RES_WIDTH: u32 = 32;

    /// Branch-taken flag (bit 64).
    pub const BR_TAKEN_OFFSET: u32 = 64;
    /// Width of `BR_TAKEN`.
    pub const BR_TAKEN_WIDTH: u32 = 1;
}

/// Fetch slice fields, in offset order.
pub const FETCH_FIELDS: [FieldDef; 2] = [
    FieldDef::new("PC", fetch::PC_OFFSET, fetch::PC_WIDTH),
    FieldDef::new("INSN", fetch::INSN_OFFSET, fetch::INSN_WIDTH),
];

/// Decode slice fields, in offset order.
pub const DECODE_FIELDS: [FieldDef; 9] = [
    FieldDef::new("PC", decode::PC_OFFSET, decode::PC_WIDTH),
    FieldDef::new("OPCODE", decode::OPCODE_OFFSET, decode::OPCODE_WIDTH),
    FieldDef::new("RD", decode::RD_OFFSET, decode::RD_WIDTH),
    FieldDef::new("RS1", decode::RS1_OFFSET, decode::RS1_WIDTH),
    FieldDef::new("RS2", decode::RS2_OFFSET, decode::RS2_WIDTH),
    FieldDef::new("FUNCT3", decode::FUNCT3_OFFSET, decode::FUNCT3_WIDTH),
    FieldDef::new("FUNCT7", decode::FUNCT7_OFFSET, decode::FUNCT7_WIDTH),
    FieldDef::new("IMM", decode::IMM_OFFSET, decode::IMM_WIDTH),
    FieldDef::new("SHAMT", decode::SHAMT_OFFSET, decode::SHAMT_WIDTH),
];

/// Register-read slice fields, in offset order.
pub const REGISTER_READ_FIELDS: [FieldDef; 4] = [
    FieldDef::new(
        "READ_RS1",
        register_read::READ_RS1_OFFSET,
        register_read::READ_RS1_WIDTH,
    ),
    FieldDef::new(
        "READ_RS2",
        register_read::READ_RS2_OFFSET,
        register_read::READ_RS2_WIDTH,
    ),
    FieldDef::new(
        "READ_RS1_DATA",
        register_read::READ_RS1_DATA_OFFSET,
        register_read::READ_RS1_DATA_WIDTH,
    ),
    FieldDef::new(
        "READ_RS2_DATA",
        register_read::READ_RS2_DATA_OFFSET,
        register_read::READ_RS2_DATA_WIDTH,
    ),
];

/// Execute slice fields, in offset order.
pub const EXECUTE_FIELDS: [FieldDef; 3] = [
    FieldDef::new("PC", execute::PC_OFFSET, execute::PC_WIDTH),
    FieldDef::new("ALU_RES", execute::ALU_RES_OFFSET, execute::ALU_RES_WIDTH),
    FieldDef::new("BR_TAKEN", execute::BR_TAKEN_OFFSET, execute::BR_TAKEN_WIDTH),
];
