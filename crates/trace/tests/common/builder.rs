use pd3_trace::{FieldId, FieldMap};

/// Builds complete (or deliberately incomplete) field mappings.
pub struct RecordBuilder {
    fields: FieldMap,
}

impl RecordBuilder {
    /// Every field present and zero.
    pub fn zeroed() -> Self {
        Self {
            fields: FieldId::ALL.into_iter().map(|id| (id, 0)).collect(),
        }
    }

    /// A plausible cycle: `addi x5, x6, -1` in decode, a taken branch in execute.
    pub fn sample() -> Self {
        Self::zeroed()
            .set(FieldId::FetchPc, 0x8000_0010)
            .set(FieldId::FetchInsn, 0x0000_0013)
            .set(FieldId::DecodePc, 0x8000_000C)
            .set(FieldId::DecodeOpcode, 0x13)
            .set(FieldId::DecodeRd, 5)
            .set(FieldId::DecodeRs1, 6)
            .set(FieldId::DecodeRs2, 31)
            .set(FieldId::DecodeFunct3, 0)
            .set(FieldId::DecodeFunct7, 0x7F)
            .set(FieldId::DecodeImm, 0xFFFF_FFFF)
            .set(FieldId::DecodeShamt, 31)
            .set(FieldId::ReadRs1, 3)
            .set(FieldId::ReadRs2, 4)
            .set(FieldId::ReadRs1Data, 0x1234_5678)
            .set(FieldId::ReadRs2Data, 0xDEAD_BEEF)
            .set(FieldId::ExecutePc, 0x8000_0004)
            .set(FieldId::ExecuteAluRes, 0x2A)
            .set(FieldId::ExecuteBrTaken, 1)
    }

    /// Every field at the largest value its width allows.
    pub fn saturated() -> Self {
        let mut builder = Self::zeroed();
        for id in FieldId::ALL {
            let width = pd3_trace::layout::PIPELINE_LAYOUT
                .span(id.stage(), id.name())
                .expect("every field id is declared")
                .width();
            builder = builder.set(id, u64::MAX >> (u64::BITS - width));
        }
        builder
    }

    /// Sets (or overrides) one field.
    pub fn set(mut self, field: FieldId, value: u64) -> Self {
        let _ = self.fields.insert(field, value);
        self
    }

    /// Drops one field, to provoke `MissingField`.
    pub fn without(mut self, field: FieldId) -> Self {
        let _ = self.fields.remove(&field);
        self
    }

    /// Finishes the mapping.
    pub fn build(self) -> FieldMap {
        self.fields
    }
}
