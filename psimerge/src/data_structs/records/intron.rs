use csv::StringRecord;
use itertools::Itertools;

use super::{
    cell,
    tallies_at,
    FormatRecord,
    RenderContext,
};
use crate::data_structs::tally::{
    Tallies,
    Tally,
};

/// Intron retention row: intron id followed by `N` summed values.
#[derive(Debug, Clone, PartialEq)]
pub struct IrRecord<const N: usize> {
    pub intron: String,
    pub values: [Tally; N],
}

/// `.IR` and `.IR2` rows: four junction/intron body counts.
pub type IrCountRecord = IrRecord<4>;
/// `.IR.summary_v2.txt` rows: six values, `ne` where not evaluated.
pub type IrSummaryRecord = IrRecord<6>;

impl<const N: usize> FormatRecord for IrRecord<N> {
    type Counts = Tallies<N>;
    type Key = String;
    type Meta = ();

    const WIDTH: usize = N + 1;

    fn parse(fields: &StringRecord) -> Result<Self, String> {
        Ok(Self {
            intron: cell(fields, 0)?.to_string(),
            values: tallies_at::<N>(fields, 1)?,
        })
    }

    fn into_parts(self) -> (Self::Key, Self::Meta, Self::Counts) {
        (self.intron, (), Tallies(self.values))
    }

    fn render(
        key: &Self::Key,
        _meta: &Self::Meta,
        counts: &Self::Counts,
        _ctx: &RenderContext<'_>,
    ) -> Vec<String> {
        std::iter::once(key.clone())
            .chain(counts.0.iter().map(Tally::to_string))
            .collect_vec()
    }
}
