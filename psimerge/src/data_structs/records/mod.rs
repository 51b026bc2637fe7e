//! Typed rows of the per-subsample tables.
//!
//! Every format is a type implementing [`FormatRecord`]: it knows how to
//! parse one tab-separated row into named fields, how to split itself into
//! the event key, the passthrough metadata and the summable counts, and how
//! to render merged counts back into a row of the same layout.

mod cassette;
mod expression;
mod intron;
mod junction;

use std::fmt::Debug;
use std::hash::Hash;

pub use cassette::{
    ExskCounts,
    ExskMeta,
    ExskRecord,
    MicCounts,
    MicRecord,
    MultiCounts,
    MultiMeta,
    MultiRecord,
};
use csv::StringRecord;
pub use expression::ExprRecord;
pub use intron::{
    IrCountRecord,
    IrRecord,
    IrSummaryRecord,
};
pub use junction::{
    EejCounts,
    EejRecord,
};

use super::tally::{
    Merge,
    Tally,
};
use crate::io::EffectiveLengthTable;

/// Group-level values a row renderer may need besides the row itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderContext<'a> {
    /// Gene effective lengths, only set when merging expression.
    pub eff_lengths:  Option<&'a EffectiveLengthTable>,
    /// Sum of the group's numeric raw counts, see
    /// [`FormatRecord::library_size`].
    pub library_size: f64,
}

/// A row of one of the per-subsample table formats.
pub trait FormatRecord: Sized {
    /// Event identifier rows are merged on.
    type Key: Ord + Hash + Clone + Debug + 'static;
    /// Columns passed through unchanged.
    type Meta: Clone + PartialEq + Debug + 'static;
    /// Summable columns.
    type Counts: Merge + Default + Clone + PartialEq + Debug + 'static;

    /// Minimal number of columns of a data row.
    const WIDTH: usize;

    fn parse(fields: &StringRecord) -> Result<Self, String>;

    fn into_parts(self) -> (Self::Key, Self::Meta, Self::Counts);

    /// Row-level inconsistency worth a warning. The row is still merged.
    fn anomaly(&self) -> Option<String> {
        None
    }

    /// Renders merged counts as output columns.
    fn render(
        key: &Self::Key,
        meta: &Self::Meta,
        counts: &Self::Counts,
        ctx: &RenderContext<'_>,
    ) -> Vec<String>;

    /// Library size of a group, computed from all of its merged rows.
    fn library_size<'a, I>(_counts: I) -> f64
    where
        I: Iterator<Item = &'a Self::Counts>, {
        0.0
    }
}

pub(crate) fn cell<'a>(
    fields: &'a StringRecord,
    idx: usize,
) -> Result<&'a str, String> {
    fields
        .get(idx)
        .ok_or_else(|| format!("missing column {}", idx + 1))
}

pub(crate) fn tally_at(
    fields: &StringRecord,
    idx: usize,
) -> Result<Tally, String> {
    cell(fields, idx)?
        .parse::<Tally>()
        .map_err(|e| format!("column {}: {}", idx + 1, e))
}

pub(crate) fn tallies_at<const N: usize>(
    fields: &StringRecord,
    start: usize,
) -> Result<[Tally; N], String> {
    let mut out = [Tally::default(); N];
    for (offset, slot) in out.iter_mut().enumerate() {
        *slot = tally_at(fields, start + offset)?;
    }
    Ok(out)
}

pub(crate) fn cells_at(
    fields: &StringRecord,
    range: std::ops::Range<usize>,
) -> Result<Vec<String>, String> {
    range
        .map(|idx| cell(fields, idx).map(str::to_string))
        .collect()
}
