pub use crate::data_structs::records::*;
pub use crate::data_structs::{
    ComplexityTier,
    FormatKind,
    FormatRecord,
    IrVersion,
    Merge,
    RenderContext,
    Sentinel,
    Tallies,
    Tally,
    Triple,
};
pub use crate::error::{
    MergeError,
    Result,
};
pub use crate::io::{
    discover,
    write_group,
    write_groups,
    Discovery,
    EffectiveLengthTable,
    GroupMap,
    RecordReader,
};
pub use crate::tools::{
    check_consistency,
    Aggregator,
    ConsistencyReport,
    FormatSummary,
    MergeConfig,
    MergePipeline,
    MergeSummary,
};
