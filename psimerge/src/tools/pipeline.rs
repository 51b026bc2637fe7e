use std::collections::{
    BTreeMap,
    BTreeSet,
};
use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use log::{
    debug,
    error,
    info,
    warn,
};
use rayon::prelude::*;
use serde::Serialize;

use super::{
    check_consistency,
    Aggregator,
};
use crate::data_structs::records::{
    EejRecord,
    ExprRecord,
    ExskRecord,
    IrCountRecord,
    IrSummaryRecord,
    MicRecord,
    MultiRecord,
};
use crate::data_structs::{
    FormatKind,
    FormatRecord,
    IrVersion,
};
use crate::error::{
    MergeError,
    Result,
};
use crate::io::{
    discover,
    write_groups,
    EffectiveLengthTable,
    GroupMap,
};
use crate::{
    getter_fn,
    with_field_fn,
};

/// Name of the directory consumed inputs are moved to.
pub const PARTS_DIR: &str = "PARTS";

#[derive(Debug, Clone, Serialize)]
pub struct MergeConfig {
    /// Subsample to group table.
    pub groups:        PathBuf,
    /// Directory holding the per-subsample tables.
    pub input_dir:     PathBuf,
    /// Directory group tables are written to, the input directory if unset.
    pub output_dir:    Option<PathBuf>,
    /// Species code; expression is merged only when set.
    pub species:       Option<String>,
    /// Database directory the effective length table is resolved in.
    pub db_dir:        PathBuf,
    /// Explicit effective length table, overrides the database lookup.
    pub eff_table:     Option<PathBuf>,
    pub ir_version:    IrVersion,
    /// Merge expression tables only.
    pub expr_only:     bool,
    /// Move consumed inputs to `<input_dir>/PARTS` after a successful merge.
    pub move_to_parts: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            groups:        PathBuf::new(),
            input_dir:     PathBuf::from("to_combine"),
            output_dir:    None,
            species:       None,
            db_dir:        PathBuf::from("VASTDB"),
            eff_table:     None,
            ir_version:    IrVersion::default(),
            expr_only:     false,
            move_to_parts: false,
        }
    }
}

impl MergeConfig {
    with_field_fn!(groups, PathBuf);
    with_field_fn!(input_dir, PathBuf);
    with_field_fn!(output_dir, Option<PathBuf>);
    with_field_fn!(species, Option<String>);
    with_field_fn!(db_dir, PathBuf);
    with_field_fn!(eff_table, Option<PathBuf>);
    with_field_fn!(ir_version, IrVersion);
    with_field_fn!(expr_only, bool);
    with_field_fn!(move_to_parts, bool);

    pub fn merges_expression(&self) -> bool {
        self.expr_only || self.species.is_some()
    }

    /// Formats merged by this configuration.
    pub fn formats(&self) -> Vec<FormatKind> {
        if self.expr_only {
            return vec![FormatKind::Expression];
        }
        let mut formats = self.ir_version.formats().to_vec();
        formats.extend([
            FormatKind::Microexon,
            FormatKind::ExonSkip,
            FormatKind::MultiExon,
            FormatKind::Junction,
        ]);
        if self.merges_expression() {
            formats.push(FormatKind::Expression);
        }
        formats
    }

    pub fn effective_output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or(&self.input_dir)
    }

    /// Path of the effective length table, `None` if expression is not
    /// merged.
    pub fn eff_table_path(&self) -> Result<Option<PathBuf>> {
        if !self.merges_expression() {
            return Ok(None);
        }
        if let Some(path) = self.eff_table.as_ref() {
            return Ok(Some(path.clone()));
        }
        match self.species.as_deref() {
            Some(species) => Ok(Some(EffectiveLengthTable::resolve(&self.db_dir, species))),
            None => {
                Err(MergeError::Config(
                    "species is required to merge expression".to_string(),
                ))
            },
        }
    }
}

/// What merging one format did.
#[derive(Debug, Clone, Serialize)]
pub struct FormatSummary {
    pub kind:           FormatKind,
    /// Distinct subsamples folded.
    pub subsamples:     usize,
    pub missing:        Vec<String>,
    pub ignored:        Vec<PathBuf>,
    pub inputs:         Vec<PathBuf>,
    pub outputs:        Vec<PathBuf>,
    pub events:         usize,
    /// Rows with internally inconsistent counts.
    pub anomalies:      usize,
    /// Records whose metadata differed from the first one seen.
    pub meta_conflicts: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MergeSummary {
    pub formats:  BTreeMap<FormatKind, FormatSummary>,
    /// Consistency warnings.
    pub warnings: Vec<String>,
    /// Inputs moved to the parts directory.
    pub archived: Vec<PathBuf>,
}

impl MergeSummary {
    pub fn subsample_counts(&self) -> BTreeMap<FormatKind, usize> {
        self.formats
            .iter()
            .map(|(kind, summary)| (*kind, summary.subsamples))
            .collect()
    }
}

/// Merges every selected format of one input directory.
pub struct MergePipeline {
    config:      MergeConfig,
    groups:      GroupMap,
    eff_lengths: Option<EffectiveLengthTable>,
}

impl MergePipeline {
    /// Loads the group table and, when expression is merged, the effective
    /// lengths. Every configuration problem is reported here, before any
    /// input is read.
    pub fn try_new(config: MergeConfig) -> Result<Self> {
        debug!(
            "Merge configuration: {}",
            serde_json::to_string(&config).unwrap_or_default()
        );
        let groups = GroupMap::from_path(&config.groups)?;
        if groups.is_empty() {
            return Err(MergeError::Config(format!(
                "group table {} assigns no subsamples",
                config.groups.display()
            )));
        }
        if !config.input_dir.is_dir() {
            return Err(MergeError::Config(format!(
                "input directory {} does not exist",
                config.input_dir.display()
            )));
        }
        let output_dir = config.effective_output_dir();
        if !output_dir.is_dir() {
            return Err(MergeError::Config(format!(
                "output directory {} does not exist",
                output_dir.display()
            )));
        }
        let eff_lengths = config
            .eff_table_path()?
            .map(EffectiveLengthTable::from_path)
            .transpose()?;

        info!(
            "{} subsamples in {} groups",
            groups.len(),
            groups.groups().len()
        );
        Ok(Self {
            config,
            groups,
            eff_lengths,
        })
    }

    getter_fn!(config, MergeConfig);

    getter_fn!(groups, GroupMap);

    pub fn formats(&self) -> Vec<FormatKind> {
        self.config.formats()
    }

    /// Reads, merges and writes one format.
    pub fn merge_format(
        &self,
        kind: FormatKind,
    ) -> Result<FormatSummary> {
        match kind {
            FormatKind::IrV1 | FormatKind::IrV2 => self.merge_records::<IrCountRecord>(kind),
            FormatKind::IrSummary => self.merge_records::<IrSummaryRecord>(kind),
            FormatKind::Microexon => self.merge_records::<MicRecord>(kind),
            FormatKind::ExonSkip => self.merge_records::<ExskRecord>(kind),
            FormatKind::MultiExon => self.merge_records::<MultiRecord>(kind),
            FormatKind::Junction => self.merge_records::<EejRecord>(kind),
            FormatKind::Expression => self.merge_records::<ExprRecord>(kind),
        }
    }

    fn merge_records<R: FormatRecord>(
        &self,
        kind: FormatKind,
    ) -> Result<FormatSummary> {
        let discovery = discover(&self.config.input_dir, kind, &self.groups)?;
        let mut summary = FormatSummary {
            kind,
            subsamples: 0,
            missing: discovery.missing.clone(),
            ignored: discovery.ignored.clone(),
            inputs: discovery.paths().map(Path::to_path_buf).collect(),
            outputs: Vec::new(),
            events: 0,
            anomalies: 0,
            meta_conflicts: 0,
        };
        if discovery.found.is_empty() {
            info!("{}: no {} files to merge", kind, kind.suffix());
            return Ok(summary);
        }

        let mut aggregator = Aggregator::<R>::new(kind);
        for (subsample, path) in discovery.found.iter() {
            let group = self.groups.group_of(subsample).ok_or_else(|| {
                MergeError::Config(format!("subsample {} has no group", subsample))
            })?;
            aggregator.fold_file(path, subsample, group)?;
        }

        summary.outputs = write_groups(
            &aggregator,
            &self.groups.groups(),
            self.config.effective_output_dir(),
            self.eff_lengths.as_ref(),
        )?;
        summary.subsamples = aggregator.subsamples_folded().len();
        summary.events = aggregator.n_events();
        summary.anomalies = aggregator.anomalies();
        summary.meta_conflicts = aggregator.meta_conflicts();

        if summary.anomalies > 0 {
            warn!("{}: {} rows with inconsistent counts", kind, summary.anomalies);
        }
        if summary.meta_conflicts > 0 {
            warn!(
                "{}: metadata differed between subsamples for {} records, first seen kept",
                kind, summary.meta_conflicts
            );
        }
        info!(
            "{}: merged {} subsamples, {} events, {} group files",
            kind,
            summary.subsamples,
            summary.events,
            summary.outputs.len()
        );
        Ok(summary)
    }

    pub fn run(&self) -> Result<MergeSummary> {
        self.run_with(|_, _| {})
    }

    /// Merges all formats in parallel, then checks their consistency and
    /// archives the inputs if requested. `on_format` is called as each
    /// format finishes.
    ///
    /// Every format is attempted even if another one fails; the first fatal
    /// error is returned once all have finished.
    pub fn run_with<F>(
        &self,
        on_format: F,
    ) -> Result<MergeSummary>
    where
        F: Fn(FormatKind, &Result<FormatSummary>) + Sync, {
        let results = self
            .formats()
            .into_par_iter()
            .map(|kind| {
                let result = self.merge_format(kind);
                on_format(kind, &result);
                (kind, result)
            })
            .collect::<Vec<_>>();

        let mut summary = MergeSummary::default();
        let mut errors = Vec::new();
        for (kind, result) in results {
            match result {
                Ok(format_summary) => {
                    summary.formats.insert(kind, format_summary);
                },
                Err(e) => {
                    error!("{}: {}", kind, e);
                    errors.push(e);
                },
            }
        }

        match check_consistency(&summary.subsample_counts()).into_result() {
            Ok(warnings) => summary.warnings = warnings,
            Err(e) => {
                error!("{}", e);
                errors.push(e);
            },
        }

        if !errors.is_empty() {
            error!("Merge failed with {} fatal error(s)", errors.len());
            return Err(errors.remove(0));
        }

        if self.config.move_to_parts {
            summary.archived = self.archive(&summary)?;
        }
        Ok(summary)
    }

    /// Moves consumed inputs into `<input_dir>/PARTS`. Inputs that were
    /// replaced by a group output of the same name stay in place.
    pub fn archive(
        &self,
        summary: &MergeSummary,
    ) -> Result<Vec<PathBuf>> {
        let parts_dir = self.config.input_dir.join(PARTS_DIR);
        fs::create_dir_all(&parts_dir)?;

        let outputs = summary
            .formats
            .values()
            .flat_map(|s| s.outputs.iter())
            .collect::<BTreeSet<_>>();

        let mut archived = Vec::new();
        for input in summary.formats.values().flat_map(|s| s.inputs.iter()) {
            if outputs.contains(input) {
                warn!(
                    "{} was overwritten by a group output, not archiving",
                    input.display()
                );
                continue;
            }
            let Some(name) = input.file_name() else {
                continue;
            };
            let target = parts_dir.join(name);
            fs::rename(input, &target)?;
            archived.push(target);
        }
        info!("Moved {} inputs to {}", archived.len(), parts_dir.display());
        Ok(archived)
    }
}
