use std::fs::File;
use std::io::{
    BufReader,
    Read,
};
use std::marker::PhantomData;
use std::path::{
    Path,
    PathBuf,
};

use csv::StringRecord;
use itertools::Itertools;

use crate::data_structs::{
    FormatKind,
    FormatRecord,
};
use crate::error::{
    MergeError,
    Result,
};

/// Streams typed rows of one per-subsample table.
///
/// Header-bearing formats must have a first line; it is kept verbatim and
/// exposed through [`RecordReader::header`].
pub struct RecordReader<R: FormatRecord> {
    path:    PathBuf,
    header:  Option<String>,
    records: csv::StringRecordsIntoIter<Box<dyn Read>>,
    _record: PhantomData<R>,
}

impl<R: FormatRecord> RecordReader<R> {
    pub fn try_new<P: AsRef<Path>>(
        path: P,
        kind: FormatKind,
    ) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            MergeError::format(path, None, format!("cannot open file: {}", e))
        })?;
        Self::from_handle(Box::new(BufReader::new(file)), path, kind)
    }

    /// Reader over any handle; `label` names the source in errors.
    pub fn from_handle<P: AsRef<Path>>(
        handle: Box<dyn Read>,
        label: P,
        kind: FormatKind,
    ) -> Result<Self> {
        let path = label.as_ref().to_path_buf();
        let mut records = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(handle)
            .into_records();

        let header = if kind.has_header() {
            match records.next() {
                Some(Ok(row)) if !is_blank(&row) => Some(row.iter().join("\t")),
                Some(Err(e)) => {
                    return Err(MergeError::format(&path, Some(1), e.to_string()))
                },
                _ => {
                    return Err(MergeError::format(
                        &path,
                        None,
                        format!("missing {} header line", kind),
                    ))
                },
            }
        }
        else {
            None
        };

        Ok(Self {
            path,
            header,
            records,
            _record: PhantomData,
        })
    }

    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse_row(
        &self,
        row: &StringRecord,
    ) -> Result<R> {
        let line = row.position().map(|p| p.line());
        if row.len() < R::WIDTH {
            return Err(MergeError::format(
                &self.path,
                line,
                format!("expected at least {} columns, found {}", R::WIDTH, row.len()),
            ));
        }
        R::parse(row).map_err(|msg| MergeError::format(&self.path, line, msg))
    }
}

fn is_blank(row: &StringRecord) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

impl<R: FormatRecord> Iterator for RecordReader<R> {
    type Item = Result<R>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let row = match self.records.next()? {
                Ok(row) => row,
                Err(e) => {
                    let line = e.position().map(|p| p.line());
                    return Some(Err(MergeError::format(&self.path, line, e.to_string())));
                },
            };
            if is_blank(&row) {
                continue;
            }
            return Some(self.parse_row(&row));
        }
    }
}
