use csv::StringRecord;

use super::{
    cell,
    tally_at,
    FormatRecord,
    RenderContext,
};
use crate::data_structs::tally::Tally;
use crate::tools::derived::crpkm;
use crate::utils::format_ratio;

/// `.cRPKM` row: gene, cRPKM (recomputed on output) and raw read count.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprRecord {
    pub gene: String,
    pub raw:  Tally,
}

impl FormatRecord for ExprRecord {
    type Counts = Tally;
    type Key = String;
    type Meta = ();

    const WIDTH: usize = 3;

    fn parse(fields: &StringRecord) -> Result<Self, String> {
        Ok(Self {
            gene: cell(fields, 0)?.to_string(),
            raw:  tally_at(fields, 2)?,
        })
    }

    fn into_parts(self) -> (Self::Key, Self::Meta, Self::Counts) {
        (self.gene, (), self.raw)
    }

    fn render(
        key: &Self::Key,
        _meta: &Self::Meta,
        counts: &Self::Counts,
        ctx: &RenderContext<'_>,
    ) -> Vec<String> {
        let eff_length = ctx.eff_lengths.and_then(|table| table.length_of(key));
        vec![
            key.clone(),
            format_ratio(crpkm(*counts, eff_length, ctx.library_size)),
            counts.to_string(),
        ]
    }

    fn library_size<'a, I>(counts: I) -> f64
    where
        I: Iterator<Item = &'a Self::Counts>, {
        counts.filter_map(Tally::value).sum()
    }
}
