//! Core data structures of the merger.
//!
//! - [`Tally`] and [`Triple`]: summable count fields. Missing values
//!   ([`Sentinel`]) are explicit and absorb any count they are merged with.
//! - [`records`]: one typed row per table format, all implementing
//!   [`FormatRecord`].
//! - Enumerations of table formats ([`FormatKind`]), intron retention
//!   pipeline versions ([`IrVersion`]) and multi-exon complexity tiers
//!   ([`ComplexityTier`]).

mod enums;
pub mod records;
mod tally;

#[cfg(test)]
mod tests;

pub use enums::{
    ComplexityTier,
    FormatKind,
    IrVersion,
};
pub use records::{
    FormatRecord,
    RenderContext,
};
pub use tally::{
    Merge,
    Sentinel,
    Tallies,
    Tally,
    Triple,
};
