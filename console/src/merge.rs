use std::path::PathBuf;

use clap::Args;
use console::style;
use indicatif::ProgressBar;
use log::info;
use psimerge::prelude::*;

use crate::utils::{
    init_pbar,
    UtilsArgs,
};

#[derive(Args, Debug, Clone)]
pub(crate) struct MergeArgs {
    #[arg(
        short,
        long,
        required = true,
        help = "Two-column table assigning subsamples to groups (subsample<TAB>group)."
    )]
    groups: PathBuf,

    #[arg(
        short,
        long = "input",
        default_value = "to_combine",
        help = "Directory with the per-subsample tables."
    )]
    input_dir: PathBuf,

    #[arg(
        short,
        long = "output",
        help = "Directory for group tables. Defaults to the input directory."
    )]
    output_dir: Option<PathBuf>,

    #[arg(
        long = "sp",
        help = "Species code. Expression tables are merged only when it is set."
    )]
    species: Option<String>,

    #[arg(
        long = "dbDir",
        default_value = "VASTDB",
        help = "Database directory holding FILES/<species>_mRNA-50.eff."
    )]
    db_dir: PathBuf,

    #[arg(long, help = "Effective length table, overrides the database lookup.")]
    eff_table: Option<PathBuf>,

    #[arg(
        long = "IR_version",
        default_value_t = IrVersion::V2,
        help = "Intron retention table version (1 or 2)."
    )]
    ir_version: IrVersion,

    #[arg(long, default_value_t = false, help = "Merge expression tables only.")]
    expr_only: bool,

    #[arg(
        long,
        default_value_t = false,
        help = "Move merged inputs to <input>/PARTS after a successful run."
    )]
    move_to_parts: bool,
}

impl From<&MergeArgs> for MergeConfig {
    fn from(args: &MergeArgs) -> Self {
        MergeConfig::default()
            .with_groups(args.groups.clone())
            .with_input_dir(args.input_dir.clone())
            .with_output_dir(args.output_dir.clone())
            .with_species(args.species.clone())
            .with_db_dir(args.db_dir.clone())
            .with_eff_table(args.eff_table.clone())
            .with_ir_version(args.ir_version)
            .with_expr_only(args.expr_only)
            .with_move_to_parts(args.move_to_parts)
    }
}

impl MergeArgs {
    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let pipeline = MergePipeline::try_new(MergeConfig::from(self))?;
        info!(
            "Merging {} formats from {}",
            pipeline.formats().len(),
            self.input_dir.display()
        );

        let progress_bar = if utils.progress {
            init_pbar(pipeline.formats().len())?
        }
        else {
            ProgressBar::hidden()
        };

        let summary = pipeline.run_with(|kind, result| {
            if result.is_ok() {
                progress_bar.set_message(format!("{} done", kind));
            }
            progress_bar.inc(1);
        })?;
        progress_bar.finish_and_clear();

        for (kind, format) in summary.formats.iter() {
            if format.subsamples == 0 {
                println!("{:<10} {}", kind.to_string(), style("no inputs").dim());
                continue;
            }
            println!(
                "{:<10} {} subsamples, {} events -> {} group tables",
                kind.to_string(),
                style(format.subsamples).green(),
                format.events,
                format.outputs.len()
            );
            if !format.missing.is_empty() {
                println!(
                    "{:<10} {} {}",
                    "",
                    style("missing:").yellow(),
                    format.missing.join(", ")
                );
            }
        }
        for warning in summary.warnings.iter() {
            eprintln!("{} {}", style("warning:").yellow(), warning);
        }
        if !summary.archived.is_empty() {
            println!(
                "Moved {} inputs to {}",
                summary.archived.len(),
                self.input_dir.join(psimerge::tools::PARTS_DIR).display()
            );
        }
        Ok(())
    }
}
