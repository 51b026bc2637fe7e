use std::collections::BTreeMap;

use itertools::Itertools;
use log::warn;

use crate::data_structs::FormatKind;
use crate::error::{
    MergeError,
    Result,
};

/// Outcome of comparing the number of subsamples merged per format.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsistencyReport {
    /// Mismatches between formats that must co-occur.
    pub errors:   Vec<String>,
    /// Mismatches involving optional formats.
    pub warnings: Vec<String>,
}

impl ConsistencyReport {
    pub fn is_consistent(&self) -> bool {
        self.errors.is_empty()
    }

    /// Logs the warnings, fails on errors.
    pub fn into_result(self) -> Result<Vec<String>> {
        for warning in self.warnings.iter() {
            warn!("{}", warning);
        }
        if self.errors.is_empty() {
            Ok(self.warnings)
        }
        else {
            Err(MergeError::Consistency(self.errors))
        }
    }
}

fn describe(counts: &[(FormatKind, usize)]) -> String {
    counts
        .iter()
        .map(|(kind, n)| format!("{}={}", kind, n))
        .join(", ")
}

/// Checks the number of distinct subsamples merged per format.
///
/// The cassette formats (exon skipping, multi-exon, microexon, junction)
/// are produced together and must agree exactly. Both intron retention v2
/// tables must agree when both were merged. Intron retention and expression
/// are optional, so a difference from the cassette formats is only a warning.
pub fn check_consistency(counts: &BTreeMap<FormatKind, usize>) -> ConsistencyReport {
    let mut report = ConsistencyReport::default();

    let cassette = FormatKind::CASSETTE
        .iter()
        .filter_map(|kind| counts.get(kind).map(|n| (*kind, *n)))
        .collect_vec();
    if !cassette.iter().map(|(_, n)| n).all_equal() {
        report.errors.push(format!(
            "event formats were merged from different numbers of subsamples ({})",
            describe(&cassette)
        ));
    }

    if let (Some(ir), Some(summary)) = (
        counts.get(&FormatKind::IrV2),
        counts.get(&FormatKind::IrSummary),
    ) {
        if *ir > 0 && *summary > 0 && ir != summary {
            report.errors.push(format!(
                "intron retention tables were merged from different numbers of subsamples ({})",
                describe(&[(FormatKind::IrV2, *ir), (FormatKind::IrSummary, *summary)])
            ));
        }
    }

    let reference = cassette
        .iter()
        .map(|(_, n)| *n)
        .max()
        .filter(|n| *n > 0);
    if let Some(reference) = reference {
        for (kind, n) in counts.iter() {
            let optional = kind.is_intron_retention() || *kind == FormatKind::Expression;
            if optional && *n > 0 && *n != reference {
                report.warnings.push(format!(
                    "{} was merged from {} subsamples, event formats from {}",
                    kind, n, reference
                ));
            }
        }
    }

    report
}
