use std::fmt::Display;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

use crate::error::MergeError;

/// Per-subsample table formats understood by the merger.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FormatKind {
    /// Intron retention, pipeline version 1.
    IrV1,
    /// Intron retention, pipeline version 2.
    IrV2,
    /// Companion summary of intron retention version 2.
    IrSummary,
    /// Microexons.
    Microexon,
    /// Exon skipping.
    ExonSkip,
    /// Multi-exon (complex) events.
    MultiExon,
    /// Exon-exon junction position histograms.
    Junction,
    /// Gene expression.
    Expression,
}

impl FormatKind {
    pub const CASSETTE: [FormatKind; 4] = [
        FormatKind::ExonSkip,
        FormatKind::MultiExon,
        FormatKind::Microexon,
        FormatKind::Junction,
    ];

    pub fn all() -> [FormatKind; 8] {
        [
            FormatKind::IrV1,
            FormatKind::IrV2,
            FormatKind::IrSummary,
            FormatKind::Microexon,
            FormatKind::ExonSkip,
            FormatKind::MultiExon,
            FormatKind::Junction,
            FormatKind::Expression,
        ]
    }

    /// File name suffix of inputs and outputs of this format.
    pub fn suffix(&self) -> &'static str {
        match self {
            FormatKind::IrV1 => ".IR",
            FormatKind::IrV2 => ".IR2",
            FormatKind::IrSummary => ".IR.summary_v2.txt",
            FormatKind::Microexon => ".micX",
            FormatKind::ExonSkip => ".exskX",
            FormatKind::MultiExon => ".MULTI3X",
            FormatKind::Junction => ".eej2",
            FormatKind::Expression => ".cRPKM",
        }
    }

    /// Whether files of this format start with a column header line.
    pub fn has_header(&self) -> bool {
        !matches!(self, FormatKind::Junction | FormatKind::Expression)
    }

    pub fn is_cassette(&self) -> bool {
        Self::CASSETTE.contains(self)
    }

    pub fn is_intron_retention(&self) -> bool {
        matches!(
            self,
            FormatKind::IrV1 | FormatKind::IrV2 | FormatKind::IrSummary
        )
    }
}

impl Display for FormatKind {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        let name = match self {
            FormatKind::IrV1 => "IR",
            FormatKind::IrV2 => "IR2",
            FormatKind::IrSummary => "IR summary",
            FormatKind::Microexon => "MIC",
            FormatKind::ExonSkip => "EXSK",
            FormatKind::MultiExon => "MULTI",
            FormatKind::Junction => "EEJ",
            FormatKind::Expression => "cRPKM",
        };
        f.write_str(name)
    }
}

/// Intron retention pipeline version. The two versions produce different
/// table sets and are never merged together.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub enum IrVersion {
    V1,
    #[default]
    V2,
}

impl IrVersion {
    pub fn formats(&self) -> &'static [FormatKind] {
        match self {
            IrVersion::V1 => &[FormatKind::IrV1],
            IrVersion::V2 => &[FormatKind::IrV2, FormatKind::IrSummary],
        }
    }
}

impl FromStr for IrVersion {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" | "v1" | "V1" => Ok(IrVersion::V1),
            "2" | "v2" | "V2" => Ok(IrVersion::V2),
            other => {
                Err(MergeError::Config(format!(
                    "intron retention version must be 1 or 2, got '{}'",
                    other
                )))
            },
        }
    }
}

impl Display for IrVersion {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            IrVersion::V1 => write!(f, "1"),
            IrVersion::V2 => write!(f, "2"),
        }
    }
}

/// How much of a multi-exon event's reference junction evidence comes from
/// junctions outside the reference set.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComplexityTier {
    /// Essentially all reads from reference junctions.
    S,
    /// More than 1/20 of reads from elsewhere.
    C1,
    /// More than 1/5.
    C2,
    /// More than half.
    C3,
}

impl Display for ComplexityTier {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            ComplexityTier::S => write!(f, "S"),
            ComplexityTier::C1 => write!(f, "C1"),
            ComplexityTier::C2 => write!(f, "C2"),
            ComplexityTier::C3 => write!(f, "C3"),
        }
    }
}
