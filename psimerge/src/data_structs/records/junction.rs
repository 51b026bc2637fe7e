use std::collections::BTreeMap;

use csv::StringRecord;

use super::{
    cell,
    tally_at,
    FormatRecord,
    RenderContext,
};
use crate::data_structs::tally::{
    Merge,
    Sentinel,
    Tally,
};
use crate::tools::derived::render_histogram;

/// `.eej2` row: gene, junction pair, total reads, an unused column and the
/// per-position read counts as `pos:count,pos:count`.
#[derive(Debug, Clone, PartialEq)]
pub struct EejRecord {
    pub gene:      String,
    pub junction:  String,
    pub total:     Tally,
    pub unused:    String,
    pub positions: Vec<(usize, f64)>,
}

/// Merged junction counts: the scalar total and a sparse histogram keyed by
/// read overlap position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EejCounts {
    pub total:     Tally,
    pub histogram: BTreeMap<usize, f64>,
}

impl EejCounts {
    /// Zero counts leave the histogram unchanged.
    pub fn add_position(
        &mut self,
        position: usize,
        count: f64,
    ) {
        if count != 0.0 {
            *self.histogram.entry(position).or_default() += count;
        }
    }
}

impl Merge for EejCounts {
    fn merge(
        &mut self,
        other: &Self,
    ) {
        self.total.merge(&other.total);
        for (position, count) in other.histogram.iter() {
            self.add_position(*position, *count);
        }
    }
}

fn parse_positions(list: &str) -> Result<Vec<(usize, f64)>, String> {
    let list = list.trim();
    if list.is_empty() || list.parse::<Sentinel>().is_ok() {
        return Ok(Vec::new());
    }
    list.split(',')
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (position, count) = entry
                .split_once(':')
                .ok_or_else(|| format!("malformed position entry '{}'", entry))?;
            let position = position
                .parse::<usize>()
                .map_err(|_| format!("malformed position '{}'", position))?;
            let count = count
                .parse::<f64>()
                .ok()
                .filter(|c| c.is_finite())
                .ok_or_else(|| format!("malformed position count '{}'", count))?;
            Ok((position, count))
        })
        .collect()
}

impl EejRecord {
    pub fn listed_sum(&self) -> f64 {
        self.positions.iter().map(|(_, count)| count).sum()
    }
}

impl FormatRecord for EejRecord {
    type Counts = EejCounts;
    type Key = (String, String);
    type Meta = String;

    const WIDTH: usize = 5;

    fn parse(fields: &StringRecord) -> Result<Self, String> {
        Ok(Self {
            gene:      cell(fields, 0)?.to_string(),
            junction:  cell(fields, 1)?.to_string(),
            total:     tally_at(fields, 2)?,
            unused:    cell(fields, 3)?.to_string(),
            positions: parse_positions(cell(fields, 4)?)?,
        })
    }

    fn into_parts(self) -> (Self::Key, Self::Meta, Self::Counts) {
        let mut counts = EejCounts {
            total:     self.total,
            histogram: BTreeMap::new(),
        };
        for (position, count) in self.positions {
            counts.add_position(position, count);
        }
        ((self.gene, self.junction), self.unused, counts)
    }

    fn anomaly(&self) -> Option<String> {
        let declared = self.total.value()?;
        let listed = self.listed_sum();
        if (declared - listed).abs() > 1e-6 {
            Some(format!(
                "{} {}: positions sum to {} but total is {}",
                self.gene, self.junction, listed, declared
            ))
        }
        else {
            None
        }
    }

    fn render(
        key: &Self::Key,
        meta: &Self::Meta,
        counts: &Self::Counts,
        _ctx: &RenderContext<'_>,
    ) -> Vec<String> {
        vec![
            key.0.clone(),
            key.1.clone(),
            counts.total.to_string(),
            meta.clone(),
            render_histogram(&counts.histogram),
        ]
    }
}
