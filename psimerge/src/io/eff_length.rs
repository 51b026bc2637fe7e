use std::fs::File;
use std::io::{
    BufReader,
    Read,
};
use std::path::{
    Path,
    PathBuf,
};

use hashbrown::HashMap;
use log::{
    debug,
    warn,
};

use crate::error::{
    MergeError,
    Result,
};
use crate::utils::clean_cell;

/// Per-gene effective lengths used to normalize expression.
#[derive(Debug, Clone, Default)]
pub struct EffectiveLengthTable {
    lengths: HashMap<String, Option<f64>>,
}

impl EffectiveLengthTable {
    /// Location of the table of `species` inside a database directory:
    /// `<db_dir>/FILES/<species>_mRNA-50.eff`.
    pub fn resolve<P: AsRef<Path>>(
        db_dir: P,
        species: &str,
    ) -> PathBuf {
        db_dir
            .as_ref()
            .join("FILES")
            .join(format!("{}_mRNA-50.eff", species))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            MergeError::Config(format!(
                "cannot open effective length table {}: {}",
                path.display(),
                e
            ))
        })?;
        let table = Self::from_reader(BufReader::new(file))?;
        debug!(
            "Loaded effective lengths of {} genes from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);

        let mut lengths = HashMap::new();
        let mut unparsed = 0usize;
        for row in csv_reader.records() {
            let row = row.map_err(|e| {
                MergeError::Config(format!("cannot read effective length table: {}", e))
            })?;
            let gene = match row.get(0).map(clean_cell) {
                Some(gene) if !gene.is_empty() => gene,
                _ => continue,
            };
            let length = row.get(1).and_then(|l| clean_cell(l).parse::<f64>().ok());
            if length.is_none() {
                unparsed += 1;
            }
            lengths.insert(gene, length);
        }
        if unparsed > 0 {
            warn!("{} genes have no usable effective length", unparsed);
        }
        Ok(Self { lengths })
    }

    pub fn length_of(
        &self,
        gene: &str,
    ) -> Option<f64> {
        self.lengths.get(gene).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }
}

impl FromIterator<(String, f64)> for EffectiveLengthTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            lengths: iter.into_iter().map(|(g, l)| (g, Some(l))).collect(),
        }
    }
}
