//! Reading and writing of the per-subsample and per-group tables.
//!
//! - [`GroupMap`]: subsample to group assignment table.
//! - [`EffectiveLengthTable`]: per-gene effective lengths for expression.
//! - [`RecordReader`]: typed row stream over one table file.
//! - [`discover`]: lists the input files of a format and matches them with
//!   the subsamples of the group table.
//! - [`write_group`] / [`write_groups`]: serialization of merged rows.

mod discover;
mod eff_length;
mod groups;
mod reader;
mod writer;


pub use discover::{
    discover,
    Discovery,
};
pub use eff_length::EffectiveLengthTable;
pub use groups::GroupMap;
pub use reader::RecordReader;
pub use writer::{
    output_path,
    write_group,
    write_groups,
};
