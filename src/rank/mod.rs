//! Section ranking and output assembly.

mod assemble;
mod options;
mod ranker;

pub use assemble::{round_to, structure_output, ReportAssembler, ReportContext};
pub use options::RankOptions;
pub use ranker::SectionRanker;
