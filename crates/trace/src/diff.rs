//! Field-equality comparison of decoded records.
//!
//! Lists the fields on which an observed record differs from the expected one.
//! Deciding whether a mismatch fails the run (for example tolerating a
//! difference in a stage that is stalled) is left to the scoreboard.

use std::fmt;

use crate::layout::{FieldId, FieldMap, Stage};

/// One field whose expected and observed values differ.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldMismatch {
    /// Differing field.
    pub field: FieldId,
    /// Value in the expected record, `None` if absent.
    pub expected: Option<u64>,
    /// Value in the observed record, `None` if absent.
    pub actual: Option<u64>,
}

impl FieldMismatch {
    /// Stage the differing field belongs to.
    pub const fn stage(&self) -> Stage {
        self.field.stage()
    }
}

impl fmt::Display for FieldMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: expected ", self.field)?;
        write_value(f, self.expected)?;
        f.write_str(", got ")?;
        write_value(f, self.actual)
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, value: Option<u64>) -> fmt::Result {
    match value {
        Some(v) => write!(f, "{v:#x}"),
        None => f.write_str("<missing>"),
    }
}

/// Compares two field mappings field by field, in layout order.
///
/// An empty result means the records are equal on every declared field.
pub fn compare(expected: &FieldMap, actual: &FieldMap) -> Vec<FieldMismatch> {
    FieldId::ALL
        .into_iter()
        .filter_map(|field| {
            let expected = expected.get(&field).copied();
            let actual = actual.get(&field).copied();
            (expected != actual).then_some(FieldMismatch {
                field,
                expected,
                actual,
            })
        })
        .collect()
}
