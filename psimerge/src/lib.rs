//! # psimerge
//!
//! `psimerge` merges the per-subsample tables of a splicing and expression
//! quantification pipeline into one table per group (biological sample).
//! Technical subsamples such as sequencing lanes or replicates run
//! separately are collapsed by summing their raw and corrected read counts
//! per event or gene. Derived statistics (inclusion ratios, complexity tiers,
//! cRPKM) are then recomputed from the summed counts instead of being
//! averaged.
//!
//! ## Supported tables
//!
//! | Format | Suffix | Event key |
//! |---|---|---|
//! | Intron retention v1 | `.IR` | intron |
//! | Intron retention v2 | `.IR2`, `.IR.summary_v2.txt` | intron |
//! | Microexons | `.micX` | event |
//! | Exon skipping | `.exskX` | event |
//! | Multi-exon events | `.MULTI3X` | event |
//! | Junction position histograms | `.eej2` | gene and junction |
//! | Expression | `.cRPKM` | gene |
//!
//! Missing values (`NA`, `ne`) are explicit: a subsample reporting one for a
//! field makes the group field missing as well.
//!
//! ## Structure
//!
//! * [`data_structs`]: count fields ([`Tally`], [`Triple`]), typed rows of
//!   every format and format enumerations.
//! * [`io`]: group and effective length tables, row readers, input
//!   discovery and group table writers.
//! * [`tools`]: aggregation, derived statistics, consistency checks and the
//!   merge pipeline.
//!
//! ## Usage
//!
//! ```no_run
//! use psimerge::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = MergeConfig::default()
//!         .with_groups("groups.tab".into())
//!         .with_input_dir("to_combine".into())
//!         .with_species(Some("hg38".to_string()));
//!     let summary = MergePipeline::try_new(config)?.run()?;
//!     for (kind, format) in summary.formats.iter() {
//!         println!("{}: {} subsamples", kind, format.subsamples);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! [`Tally`]: data_structs::Tally
//! [`Triple`]: data_structs::Triple

pub mod data_structs;
pub mod error;
pub mod io;
pub mod prelude;
pub mod tools;
pub mod utils;

pub use error::{
    MergeError,
    Result,
};
