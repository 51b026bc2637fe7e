use std::fs::File;
use std::io::{
    BufWriter,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};

use log::{
    debug,
    warn,
};

use super::EffectiveLengthTable;
use crate::data_structs::{
    FormatRecord,
    RenderContext,
};
use crate::error::Result;
use crate::tools::Aggregator;

/// Output path of `group` for the aggregator's format.
pub fn output_path<P: AsRef<Path>>(
    out_dir: P,
    group: &str,
    suffix: &str,
) -> PathBuf {
    out_dir.as_ref().join(format!("{}{}", group, suffix))
}

/// Writes the merged rows of one group, header first. Returns the number of
/// rows written.
pub fn write_group<R: FormatRecord, W: Write>(
    aggregator: &Aggregator<R>,
    group: &str,
    eff_lengths: Option<&EffectiveLengthTable>,
    handle: W,
) -> Result<usize> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(handle);

    if let Some(header) = aggregator.header() {
        writer.write_record(header.split('\t'))?;
    }

    let ctx = RenderContext {
        eff_lengths,
        library_size: aggregator.library_size(group),
    };

    let mut n_rows = 0;
    for (key, counts) in aggregator.entries(group) {
        let Some(meta) = aggregator.metadata(key) else {
            warn!("{}: no metadata for {:?}, skipping", aggregator.kind(), key);
            continue;
        };
        writer.write_record(R::render(key, meta, counts, &ctx))?;
        n_rows += 1;
    }
    writer.flush()?;
    Ok(n_rows)
}

/// Writes one file per group into `out_dir`, also for groups without data.
pub fn write_groups<R: FormatRecord, P: AsRef<Path>>(
    aggregator: &Aggregator<R>,
    groups: &[String],
    out_dir: P,
    eff_lengths: Option<&EffectiveLengthTable>,
) -> Result<Vec<PathBuf>> {
    let suffix = aggregator.kind().suffix();
    let mut written = Vec::with_capacity(groups.len());
    for group in groups {
        let path = output_path(out_dir.as_ref(), group, suffix);
        let handle = BufWriter::new(File::create(&path)?);
        let n_rows = write_group(aggregator, group, eff_lengths, handle)?;
        debug!("{}: wrote {} rows to {}", aggregator.kind(), n_rows, path.display());
        written.push(path);
    }
    Ok(written)
}
