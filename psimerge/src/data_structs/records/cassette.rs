use csv::StringRecord;

use super::{
    cell,
    cells_at,
    tallies_at,
    FormatRecord,
    RenderContext,
};
use crate::data_structs::tally::{
    Merge,
    Tally,
    Triple,
};
use crate::tools::derived::{
    complexity,
    exskip_psi,
    microexon_psi,
    multi_psi,
};
use crate::utils::format_ratio;

// --- Microexons ---

/// `.micX` row.
///
/// Columns 1-6 are passthrough metadata with the event id in column 2,
/// column 7 holds the inclusion ratio and columns 8-11 the counts.
#[derive(Debug, Clone, PartialEq)]
pub struct MicRecord {
    pub meta:   Vec<String>,
    pub counts: MicCounts,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MicCounts {
    pub raw_inc:  Tally,
    pub raw_exc:  Tally,
    pub corr_inc: Tally,
    pub corr_exc: Tally,
}

impl Merge for MicCounts {
    fn merge(
        &mut self,
        other: &Self,
    ) {
        self.raw_inc.merge(&other.raw_inc);
        self.raw_exc.merge(&other.raw_exc);
        self.corr_inc.merge(&other.corr_inc);
        self.corr_exc.merge(&other.corr_exc);
    }
}

impl MicRecord {
    const META: usize = 6;
    const KEY: usize = 1;
    const COUNTS: usize = 7;
}

impl FormatRecord for MicRecord {
    type Counts = MicCounts;
    type Key = String;
    type Meta = Vec<String>;

    const WIDTH: usize = Self::COUNTS + 4;

    fn parse(fields: &StringRecord) -> Result<Self, String> {
        let [raw_inc, raw_exc, corr_inc, corr_exc] =
            tallies_at::<4>(fields, Self::COUNTS)?;
        Ok(Self {
            meta:   cells_at(fields, 0..Self::META)?,
            counts: MicCounts {
                raw_inc,
                raw_exc,
                corr_inc,
                corr_exc,
            },
        })
    }

    fn into_parts(self) -> (Self::Key, Self::Meta, Self::Counts) {
        (self.meta[Self::KEY].clone(), self.meta, self.counts)
    }

    fn render(
        _key: &Self::Key,
        meta: &Self::Meta,
        counts: &Self::Counts,
        _ctx: &RenderContext<'_>,
    ) -> Vec<String> {
        let mut row = meta.clone();
        row.push(format_ratio(microexon_psi(counts.corr_inc, counts.corr_exc)));
        row.extend(
            [
                counts.raw_inc,
                counts.raw_exc,
                counts.corr_inc,
                counts.corr_exc,
            ]
            .iter()
            .map(Tally::to_string),
        );
        row
    }
}

// --- Exon skipping ---

/// `.exskX` row.
///
/// Layout: 12 leading metadata columns (event id in column 4), inclusion
/// ratio, raw block (inclusion 1, inclusion 2, exclusion, sum of reads),
/// corrected block (inclusion 1, inclusion 2, exclusion), 4 trailing
/// metadata columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ExskRecord {
    pub meta:   ExskMeta,
    pub counts: ExskCounts,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExskMeta {
    pub leading:  Vec<String>,
    pub trailing: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExskCounts {
    pub raw:       [Tally; 4],
    pub corrected: [Tally; 3],
}

impl Merge for ExskCounts {
    fn merge(
        &mut self,
        other: &Self,
    ) {
        self.raw.merge(&other.raw);
        self.corrected.merge(&other.corrected);
    }
}

impl ExskRecord {
    const LEADING: usize = 12;
    const KEY: usize = 3;
    const RAW: usize = 13;
    const CORRECTED: usize = 17;
    const TRAILING: usize = 20;
}

impl FormatRecord for ExskRecord {
    type Counts = ExskCounts;
    type Key = String;
    type Meta = ExskMeta;

    const WIDTH: usize = Self::TRAILING + 4;

    fn parse(fields: &StringRecord) -> Result<Self, String> {
        Ok(Self {
            meta:   ExskMeta {
                leading:  cells_at(fields, 0..Self::LEADING)?,
                trailing: cells_at(fields, Self::TRAILING..Self::TRAILING + 4)?,
            },
            counts: ExskCounts {
                raw:       tallies_at::<4>(fields, Self::RAW)?,
                corrected: tallies_at::<3>(fields, Self::CORRECTED)?,
            },
        })
    }

    fn into_parts(self) -> (Self::Key, Self::Meta, Self::Counts) {
        (self.meta.leading[Self::KEY].clone(), self.meta, self.counts)
    }

    fn render(
        _key: &Self::Key,
        meta: &Self::Meta,
        counts: &Self::Counts,
        _ctx: &RenderContext<'_>,
    ) -> Vec<String> {
        let [inc1, inc2, exc] = counts.corrected;
        let mut row = meta.leading.clone();
        row.push(format_ratio(exskip_psi(inc1, inc2, exc)));
        row.extend(counts.raw.iter().map(Tally::to_string));
        row.extend(counts.corrected.iter().map(Tally::to_string));
        row.extend(meta.trailing.iter().cloned());
        row
    }
}

// --- Multi-exon events ---

/// `.MULTI3X` row.
///
/// Layout: 12 pre metadata columns (event id in column 4), inclusion ratio,
/// 4 raw counts, 2 mid metadata columns, 3 reference junction triples
/// (inclusion 1, inclusion 2, exclusion), complexity tier, 4 post metadata
/// columns.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiRecord {
    pub meta:   MultiMeta,
    pub counts: MultiCounts,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiMeta {
    pub pre:  Vec<String>,
    pub mid:  Vec<String>,
    pub post: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MultiCounts {
    pub raw:       [Tally; 4],
    pub junctions: [Triple; 3],
}

impl Merge for MultiCounts {
    fn merge(
        &mut self,
        other: &Self,
    ) {
        self.raw.merge(&other.raw);
        self.junctions.merge(&other.junctions);
    }
}

impl MultiRecord {
    const PRE: usize = 12;
    const KEY: usize = 3;
    const RAW: usize = 13;
    const MID: usize = 17;
    const JUNCTIONS: usize = 19;
    const POST: usize = 23;
}

impl FormatRecord for MultiRecord {
    type Counts = MultiCounts;
    type Key = String;
    type Meta = MultiMeta;

    const WIDTH: usize = Self::POST + 4;

    fn parse(fields: &StringRecord) -> Result<Self, String> {
        let mut junctions = [Triple::default(); 3];
        for (offset, slot) in junctions.iter_mut().enumerate() {
            *slot = Triple::parse_lenient(cell(fields, Self::JUNCTIONS + offset)?);
        }
        Ok(Self {
            meta:   MultiMeta {
                pre:  cells_at(fields, 0..Self::PRE)?,
                mid:  cells_at(fields, Self::MID..Self::JUNCTIONS)?,
                post: cells_at(fields, Self::POST..Self::POST + 4)?,
            },
            counts: MultiCounts {
                raw: tallies_at::<4>(fields, Self::RAW)?,
                junctions,
            },
        })
    }

    fn into_parts(self) -> (Self::Key, Self::Meta, Self::Counts) {
        (self.meta.pre[Self::KEY].clone(), self.meta, self.counts)
    }

    fn render(
        _key: &Self::Key,
        meta: &Self::Meta,
        counts: &Self::Counts,
        _ctx: &RenderContext<'_>,
    ) -> Vec<String> {
        let mut row = meta.pre.clone();
        row.push(format_ratio(multi_psi(&counts.junctions)));
        row.extend(counts.raw.iter().map(Tally::to_string));
        row.extend(meta.mid.iter().cloned());
        row.extend(counts.junctions.iter().map(Triple::to_string));
        row.push(complexity(&counts.junctions).to_string());
        row.extend(meta.post.iter().cloned());
        row
    }
}
