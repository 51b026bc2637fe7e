//! Statistics recomputed from merged counts.
//!
//! All functions are pure and take group-level sums only. A `None` result is
//! written as `NA`.

use std::collections::BTreeMap;

use itertools::Itertools;

use crate::data_structs::{
    ComplexityTier,
    Tally,
    Triple,
};
use crate::utils::format_count;

/// Microexon inclusion ratio `100 * inc / (inc + exc)` from corrected counts.
pub fn microexon_psi(
    inc: Tally,
    exc: Tally,
) -> Option<f64> {
    let (inc, exc) = (inc.value()?, exc.value()?);
    if inc + exc == 0.0 {
        return None;
    }
    Some(100.0 * inc / (inc + exc))
}

/// Exon skipping inclusion ratio `100 * (inc1 + inc2) / ((inc1 + inc2) + 2 *
/// exc)` from corrected counts.
pub fn exskip_psi(
    inc1: Tally,
    inc2: Tally,
    exc: Tally,
) -> Option<f64> {
    let inc = inc1.value()? + inc2.value()?;
    let denominator = inc + 2.0 * exc.value()?;
    if denominator == 0.0 {
        return None;
    }
    Some(100.0 * inc / denominator)
}

/// Multi-exon inclusion ratio: the exon skipping formula over the total
/// part of each reference junction triple.
pub fn multi_psi(junctions: &[Triple; 3]) -> Option<f64> {
    exskip_psi(junctions[0].total, junctions[1].total, junctions[2].total)
}

/// Complexity tier from the share of reference junction reads that do not
/// come from the reference set. Missing parts count as zero.
pub fn complexity(junctions: &[Triple; 3]) -> ComplexityTier {
    let total: f64 = junctions.iter().map(|t| t.total.or_zero()).sum();
    let from_reference: f64 = junctions
        .iter()
        .map(|t| t.reference_only.or_zero())
        .sum();
    if total <= 0.0 {
        return ComplexityTier::S;
    }
    complexity_tier((total - from_reference) / total)
}

/// Tier of a from-elsewhere fraction. Bounds are exclusive.
pub fn complexity_tier(fraction: f64) -> ComplexityTier {
    if fraction > 0.5 {
        ComplexityTier::C3
    }
    else if fraction > 0.2 {
        ComplexityTier::C2
    }
    else if fraction > 0.05 {
        ComplexityTier::C1
    }
    else {
        ComplexityTier::S
    }
}

/// Corrected reads per kilobase per million:
/// `1e6 * (1000 * raw / eff_length) / library_size`.
pub fn crpkm(
    raw: Tally,
    eff_length: Option<f64>,
    library_size: f64,
) -> Option<f64> {
    let raw = raw.value()?;
    let eff_length = eff_length.filter(|l| *l > 0.0)?;
    if library_size <= 0.0 {
        return None;
    }
    Some(1e6 * (1000.0 * raw / eff_length) / library_size)
}

/// `pos:count` for every non-zero position, ascending, comma-joined.
pub fn render_histogram(histogram: &BTreeMap<usize, f64>) -> String {
    histogram
        .iter()
        .filter(|(_, count)| **count != 0.0)
        .map(|(position, count)| format!("{}:{}", position, format_count(*count)))
        .join(",")
}
