//! Layout self-check.
//!
//! Verifies the invariants every record layout must hold before a codec may use it:
//! 1. **Record:** The record fits the 512-bit storage.
//! 2. **Slices:** One slice per stage, each `slice_bits` wide, together partitioning
//!    `0..record_bits` with no gap and no overlap.
//! 3. **Fields:** Non-empty, at most 64 bits, unique within their slice, inside the
//!    slice, and pairwise disjoint.
//!
//! Run once when a codec is built and from the test suite, never per record.

use tracing::{debug, error};

use super::{FieldDef, SliceLayout, Stage, TraceLayout};
use crate::common::{BitSpan, CodecError, LayoutViolation, RECORD_BITS};

impl TraceLayout<'_> {
    /// Every invariant breach in the layout, in discovery order.
    ///
    /// An empty result means the layout is sound.
    pub fn violations(&self) -> Vec<LayoutViolation> {
        let mut found = Vec::new();

        if self.record_bits > RECORD_BITS {
            found.push(LayoutViolation::RecordTooWide {
                record_bits: self.record_bits,
                capacity: RECORD_BITS,
            });
        }

        check_slices(self, &mut found);
        for slice in self.slices {
            check_fields(slice, &mut found);
        }
        found
    }

    /// Checks the layout invariants.
    ///
    /// Every breach is logged at error level; the first one is returned.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::LayoutInvariantViolation`] if any invariant does not hold.
    pub fn validate(&self) -> Result<(), CodecError> {
        let violations = self.violations();
        for violation in &violations {
            error!(version = self.version, %violation, "trace layout violation");
        }

        match violations.into_iter().next() {
            Some(first) => Err(first.into()),
            None => {
                debug!(
                    version = self.version,
                    slices = self.slices.len(),
                    fields = self.fields().count(),
                    "trace layout validated"
                );
                Ok(())
            }
        }
    }
}

fn check_slices(layout: &TraceLayout<'_>, found: &mut Vec<LayoutViolation>) {
    let mut seen: Vec<Stage> = Vec::with_capacity(layout.slices.len());
    for slice in layout.slices {
        if seen.contains(&slice.stage) {
            found.push(LayoutViolation::DuplicateStage(slice.stage));
        } else {
            seen.push(slice.stage);
        }
        if slice.width != layout.slice_bits {
            found.push(LayoutViolation::SliceWidth {
                stage: slice.stage,
                width: slice.width,
                expected: layout.slice_bits,
            });
        }
    }

    let mut ordered: Vec<&SliceLayout<'_>> = layout.slices.iter().collect();
    ordered.sort_by_key(|s| s.base);

    // `reach` is the slice extending furthest so far; every later slice must start at its end.
    let mut reach: Option<&SliceLayout<'_>> = None;
    for slice in ordered {
        let cursor = reach.map_or(0, SliceLayout::end);
        if slice.base > cursor {
            found.push(LayoutViolation::SliceGap {
                stage: slice.stage,
                expected_base: cursor,
                base: slice.base,
            });
        } else if let Some(previous) = reach.filter(|_| slice.base < cursor) {
            found.push(LayoutViolation::SliceOverlap {
                stage: slice.stage,
                base: slice.base,
                previous: previous.stage,
                previous_end: cursor,
            });
        }
        if slice.end() > cursor {
            reach = Some(slice);
        }
    }

    let covered = reach.map_or(0, SliceLayout::end);
    if covered != layout.record_bits {
        found.push(LayoutViolation::Coverage {
            covered,
            record_bits: layout.record_bits,
        });
    }
}

fn check_fields(slice: &SliceLayout<'_>, found: &mut Vec<LayoutViolation>) {
    let stage = slice.stage;

    for (i, field) in slice.fields.iter().enumerate() {
        if slice.fields[..i]
            .iter()
            .any(|f| f.name.eq_ignore_ascii_case(field.name))
        {
            found.push(LayoutViolation::DuplicateField {
                stage,
                field: field.name,
            });
        }
        if field.width == 0 {
            found.push(LayoutViolation::EmptyField {
                stage,
                field: field.name,
            });
        } else if field.width > BitSpan::MAX_WIDTH {
            found.push(LayoutViolation::FieldTooWide {
                stage,
                field: field.name,
                width: field.width,
            });
        }
        if field.end() > slice.width {
            found.push(LayoutViolation::FieldOutOfSlice {
                stage,
                field: field.name,
                offset: field.offset,
                width: field.width,
                slice_bits: slice.width,
            });
        }
    }

    let mut ordered: Vec<&FieldDef> = slice.fields.iter().filter(|f| f.width > 0).collect();
    ordered.sort_by_key(|f| f.offset);

    let mut reach: Option<&FieldDef> = None;
    for field in ordered {
        if let Some(previous) = reach.filter(|r| field.offset < r.end()) {
            found.push(LayoutViolation::FieldOverlap {
                stage,
                field: field.name,
                other: previous.name,
            });
        }
        if reach.is_none_or(|r| field.end() > r.end()) {
            reach = Some(field);
        }
    }
}
