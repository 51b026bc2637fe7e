use std::fmt::Display;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

use crate::utils::format_count;

/// Marker written in place of a count that could not be obtained.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, Serialize, Deserialize)]
pub enum Sentinel {
    /// `NA`, not available.
    NotAvailable,
    /// `ne`, not evaluated.
    NotEvaluated,
}

impl Sentinel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentinel::NotAvailable => "NA",
            Sentinel::NotEvaluated => "ne",
        }
    }
}

impl Display for Sentinel {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentinel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NA" => Ok(Sentinel::NotAvailable),
            "ne" => Ok(Sentinel::NotEvaluated),
            _ => Err(()),
        }
    }
}

/// Summable field of an accumulator.
///
/// A missing value absorbs every count it is merged with, so a single
/// subsample reporting `NA` turns the group value into `NA`.
#[derive(PartialEq, Copy, Clone, Debug, Serialize, Deserialize)]
pub enum Tally {
    Count(f64),
    Missing(Sentinel),
}

impl Default for Tally {
    fn default() -> Self {
        Tally::Count(0.0)
    }
}

impl Tally {
    pub const NA: Tally = Tally::Missing(Sentinel::NotAvailable);
    pub const NE: Tally = Tally::Missing(Sentinel::NotEvaluated);

    /// Numeric value, `None` for sentinels.
    pub fn value(&self) -> Option<f64> {
        match self {
            Tally::Count(v) => Some(*v),
            Tally::Missing(_) => None,
        }
    }

    /// Numeric value with sentinels read as zero.
    pub fn or_zero(&self) -> f64 {
        self.value().unwrap_or(0.0)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Tally::Missing(_))
    }
}

impl From<f64> for Tally {
    fn from(value: f64) -> Self {
        Tally::Count(value)
    }
}

impl From<Sentinel> for Tally {
    fn from(value: Sentinel) -> Self {
        Tally::Missing(value)
    }
}

impl FromStr for Tally {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(sentinel) = Sentinel::from_str(s) {
            return Ok(Tally::Missing(sentinel));
        }
        match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Tally::Count(v)),
            _ => Err(format!("'{}' is neither a count nor NA/ne", s)),
        }
    }
}

impl Display for Tally {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Tally::Count(v) => f.write_str(&format_count(*v)),
            Tally::Missing(s) => write!(f, "{}", s),
        }
    }
}

/// Per-field folding of summed values.
pub trait Merge {
    fn merge(
        &mut self,
        other: &Self,
    );
}

impl Merge for Tally {
    fn merge(
        &mut self,
        other: &Self,
    ) {
        *self = match (*self, *other) {
            (_, Tally::Missing(s)) => Tally::Missing(s),
            (Tally::Missing(s), Tally::Count(_)) => Tally::Missing(s),
            (Tally::Count(a), Tally::Count(b)) => Tally::Count(a + b),
        };
    }
}

impl<T: Merge, const N: usize> Merge for [T; N] {
    fn merge(
        &mut self,
        other: &Self,
    ) {
        for (left, right) in self.iter_mut().zip(other.iter()) {
            left.merge(right);
        }
    }
}

/// Reference junction counts of a multi-exon event, written as
/// `total=corrected=reference_only`.
#[derive(PartialEq, Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Triple {
    pub total:          Tally,
    pub corrected:      Tally,
    pub reference_only: Tally,
}

impl Triple {
    pub const SEPARATOR: char = '=';

    pub fn new(
        total: Tally,
        corrected: Tally,
        reference_only: Tally,
    ) -> Self {
        Self {
            total,
            corrected,
            reference_only,
        }
    }

    /// Parses `a=b=c`. Parts that are absent or not a count degrade to zero
    /// instead of failing the field. A bare sentinel (`NA`) marks all three
    /// parts missing and is written back as the bare sentinel.
    pub fn parse_lenient(s: &str) -> Self {
        if let Ok(sentinel) = s.trim().parse::<Sentinel>() {
            let missing = Tally::Missing(sentinel);
            return Self::new(missing, missing, missing);
        }
        let mut parts = s
            .split(Self::SEPARATOR)
            .map(|part| part.parse::<Tally>().unwrap_or_default());
        Self {
            total:          parts.next().unwrap_or_default(),
            corrected:      parts.next().unwrap_or_default(),
            reference_only: parts.next().unwrap_or_default(),
        }
    }
}

impl Merge for Triple {
    fn merge(
        &mut self,
        other: &Self,
    ) {
        self.total.merge(&other.total);
        self.corrected.merge(&other.corrected);
        self.reference_only.merge(&other.reference_only);
    }
}

impl Display for Triple {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        if let Tally::Missing(sentinel) = self.total {
            if self.corrected == self.total && self.reference_only == self.total {
                return write!(f, "{}", sentinel);
            }
        }
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.total,
            self.corrected,
            self.reference_only,
            sep = Self::SEPARATOR
        )
    }
}

/// Fixed run of independently summed values.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct Tallies<const N: usize>(pub [Tally; N]);

impl<const N: usize> Default for Tallies<N> {
    fn default() -> Self {
        Self([Tally::default(); N])
    }
}

impl<const N: usize> Merge for Tallies<N> {
    fn merge(
        &mut self,
        other: &Self,
    ) {
        self.0.merge(&other.0);
    }
}

impl<const N: usize> std::ops::Index<usize> for Tallies<N> {
    type Output = Tally;

    fn index(
        &self,
        index: usize,
    ) -> &Self::Output {
        &self.0[index]
    }
}
