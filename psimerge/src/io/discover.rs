use std::collections::BTreeMap;
use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use log::{
    debug,
    warn,
};

use super::GroupMap;
use crate::data_structs::FormatKind;
use crate::error::{
    MergeError,
    Result,
};
use crate::utils::strip_suffix;

/// Inputs of one format found in the input directory, checked against the
/// subsamples of the group table.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// `(subsample, path)` of every file whose subsample is in the group
    /// table, sorted by subsample.
    pub found:   Vec<(String, PathBuf)>,
    /// Subsamples of the group table with no file of this format.
    pub missing: Vec<String>,
    /// Files of this format whose subsample is not in the group table.
    pub ignored: Vec<PathBuf>,
}

impl Discovery {
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.found.iter().map(|(_, path)| path.as_path())
    }
}

/// Lists the files of format `kind` in `input_dir`.
pub fn discover<P: AsRef<Path>>(
    input_dir: P,
    kind: FormatKind,
    groups: &GroupMap,
) -> Result<Discovery> {
    let input_dir = input_dir.as_ref();
    let entries = fs::read_dir(input_dir).map_err(|e| {
        MergeError::Config(format!(
            "cannot list input directory {}: {}",
            input_dir.display(),
            e
        ))
    })?;

    let mut found = BTreeMap::new();
    let mut ignored = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(subsample) = strip_suffix(&path, kind.suffix()) else {
            continue;
        };
        if groups.contains(subsample) {
            found.insert(subsample.to_string(), path.clone());
        }
        else {
            debug!("{} is not in the group table, ignoring", path.display());
            ignored.push(path);
        }
    }
    ignored.sort();

    let missing = groups
        .subsamples()
        .into_iter()
        .filter(|s| !found.contains_key(s))
        .collect::<Vec<_>>();
    if !found.is_empty() && !missing.is_empty() {
        warn!(
            "{}: no {} file for {} subsample(s): {}",
            kind,
            kind.suffix(),
            missing.len(),
            missing.join(", ")
        );
    }

    Ok(Discovery {
        found: found.into_iter().collect(),
        missing,
        ignored,
    })
}
