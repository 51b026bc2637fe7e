//! Merging of subsample tables into group tables.
//!
//! - [`Aggregator`]: per-format fold of subsample rows into per-group sums.
//! - [`derived`]: inclusion ratios, complexity tiers, cRPKM and junction
//!   histograms recomputed from the sums.
//! - [`check_consistency`]: comparison of subsample counts across formats.
//! - [`MergePipeline`]: discovery, parallel per-format merging, consistency
//!   checking and archiving of an input directory.
mod aggregate;
mod consistency;
pub mod derived;
mod pipeline;


pub use aggregate::Aggregator;
pub use consistency::{
    check_consistency,
    ConsistencyReport,
};
pub use pipeline::{
    FormatSummary,
    MergeConfig,
    MergePipeline,
    MergeSummary,
    PARTS_DIR,
};
