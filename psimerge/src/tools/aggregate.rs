use std::collections::{
    BTreeMap,
    BTreeSet,
};
use std::path::Path;

use hashbrown::hash_map::Entry;
use hashbrown::HashMap;
use log::{
    debug,
    warn,
};

use crate::data_structs::{
    FormatKind,
    FormatRecord,
    Merge,
};
use crate::error::Result;
use crate::io::RecordReader;

/// Per-group, per-event sums of one table format.
///
/// Passthrough metadata is kept once per event, from the first record that
/// carries it.
pub struct Aggregator<R: FormatRecord> {
    kind:           FormatKind,
    header:         Option<String>,
    tables:         HashMap<String, BTreeMap<R::Key, R::Counts>>,
    metadata:       HashMap<R::Key, R::Meta>,
    subsamples:     BTreeSet<String>,
    meta_conflicts: usize,
    anomalies:      usize,
}

impl<R: FormatRecord> Aggregator<R> {
    pub fn new(kind: FormatKind) -> Self {
        Self {
            kind,
            header: None,
            tables: HashMap::new(),
            metadata: HashMap::new(),
            subsamples: BTreeSet::new(),
            meta_conflicts: 0,
            anomalies: 0,
        }
    }

    pub fn kind(&self) -> FormatKind {
        self.kind
    }

    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    /// Keeps the first header seen.
    pub fn set_header(
        &mut self,
        header: &str,
    ) {
        if self.header.is_none() {
            self.header = Some(header.to_string());
        }
    }

    /// Adds one record of `group` to the sums.
    pub fn fold(
        &mut self,
        group: &str,
        record: R,
    ) {
        if let Some(msg) = record.anomaly() {
            warn!("{}: {}", self.kind, msg);
            self.anomalies += 1;
        }
        let (key, meta, counts) = record.into_parts();

        match self.metadata.entry(key.clone()) {
            Entry::Occupied(known) => {
                if known.get() != &meta {
                    debug!("{}: metadata of {:?} differs between subsamples", self.kind, key);
                    self.meta_conflicts += 1;
                }
            },
            Entry::Vacant(slot) => {
                slot.insert(meta);
            },
        }

        self.tables
            .entry_ref(group)
            .or_default()
            .entry(key)
            .or_default()
            .merge(&counts);
    }

    /// Folds every record of one subsample file into `group`. Returns the
    /// number of records read.
    pub fn fold_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        subsample: &str,
        group: &str,
    ) -> Result<usize> {
        let reader = RecordReader::<R>::try_new(path.as_ref(), self.kind)?;
        self.fold_reader(reader, subsample, group)
    }

    pub fn fold_reader(
        &mut self,
        reader: RecordReader<R>,
        subsample: &str,
        group: &str,
    ) -> Result<usize> {
        if let Some(header) = reader.header() {
            self.set_header(header);
        }
        let source = reader.path().to_path_buf();
        let mut n_records = 0;
        for record in reader {
            self.fold(group, record?);
            n_records += 1;
        }
        self.subsamples.insert(subsample.to_string());
        debug!(
            "{}: folded {} records of {} ({}) into {}",
            self.kind,
            n_records,
            subsample,
            source.display(),
            group
        );
        Ok(n_records)
    }

    /// Merged rows of a group in key order. Empty for groups without data.
    pub fn entries(
        &self,
        group: &str,
    ) -> impl Iterator<Item = (&R::Key, &R::Counts)> {
        self.tables
            .get(group)
            .into_iter()
            .flat_map(|table| table.iter())
    }

    pub fn counts(
        &self,
        group: &str,
        key: &R::Key,
    ) -> Option<&R::Counts> {
        self.tables.get(group).and_then(|table| table.get(key))
    }

    pub fn metadata(
        &self,
        key: &R::Key,
    ) -> Option<&R::Meta> {
        self.metadata.get(key)
    }

    pub fn library_size(
        &self,
        group: &str,
    ) -> f64 {
        R::library_size(self.entries(group).map(|(_, counts)| counts))
    }

    /// Groups that received at least one record, sorted.
    pub fn groups_seen(&self) -> Vec<String> {
        let mut groups = self.tables.keys().cloned().collect::<Vec<_>>();
        groups.sort();
        groups
    }

    /// Distinct subsamples folded so far.
    pub fn subsamples_folded(&self) -> &BTreeSet<String> {
        &self.subsamples
    }

    pub fn n_events(&self) -> usize {
        self.metadata.len()
    }

    /// Rows whose contents were internally inconsistent.
    pub fn anomalies(&self) -> usize {
        self.anomalies
    }

    /// Records whose metadata differed from the first one seen.
    pub fn meta_conflicts(&self) -> usize {
        self.meta_conflicts
    }
}
