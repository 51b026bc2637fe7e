use std::collections::BTreeSet;
use std::fs::File;
use std::io::{
    BufReader,
    Read,
};
use std::path::Path;

use hashbrown::HashMap;
use itertools::Itertools;
use log::{
    debug,
    warn,
};

use crate::error::{
    MergeError,
    Result,
};
use crate::utils::clean_cell;

/// Assignment of subsamples to groups, loaded from a two-column
/// tab-separated table (`subsample<TAB>group`).
#[derive(Debug, Clone, Default)]
pub struct GroupMap {
    groups: HashMap<String, String>,
}

impl GroupMap {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            MergeError::Config(format!(
                "cannot open group table {}: {}",
                path.display(),
                e
            ))
        })?;
        let map = Self::from_reader(BufReader::new(file))?;
        debug!(
            "Loaded {} subsamples in {} groups from {}",
            map.len(),
            map.groups().len(),
            path.display()
        );
        Ok(map)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);

        let mut groups = HashMap::new();
        for (idx, row) in csv_reader.records().enumerate() {
            let row = row.map_err(|e| {
                MergeError::Config(format!("cannot read group table: {}", e))
            })?;
            let cells = row.iter().map(clean_cell).collect_vec();
            if cells.iter().all(String::is_empty) {
                continue;
            }
            if cells.len() < 2 || cells[0].is_empty() || cells[1].is_empty() {
                warn!(
                    "Group table row {} has fewer than two columns, skipping",
                    idx + 1
                );
                continue;
            }
            if let Some(previous) = groups.insert(cells[0].clone(), cells[1].clone()) {
                warn!(
                    "Subsample {} listed twice in group table ({} replaced by {})",
                    cells[0], previous, cells[1]
                );
            }
        }
        Ok(Self { groups })
    }

    pub fn group_of(
        &self,
        subsample: &str,
    ) -> Option<&str> {
        self.groups.get(subsample).map(String::as_str)
    }

    pub fn contains(
        &self,
        subsample: &str,
    ) -> bool {
        self.groups.contains_key(subsample)
    }

    /// Distinct group names, sorted.
    pub fn groups(&self) -> Vec<String> {
        self.groups
            .values()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Subsample names, sorted.
    pub fn subsamples(&self) -> Vec<String> {
        self.groups.keys().cloned().sorted().collect()
    }

    pub fn subsamples_of(
        &self,
        group: &str,
    ) -> Vec<String> {
        self.groups
            .iter()
            .filter(|(_, g)| g.as_str() == group)
            .map(|(s, _)| s.clone())
            .sorted()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl FromIterator<(String, String)> for GroupMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            groups: iter.into_iter().collect(),
        }
    }
}
