//! Quotation mark style inference

pub mod candidates;
pub mod inferrer;
pub mod positions;

pub use candidates::{
    CandidatePair, CandidateTable, DEFAULT_CANDIDATE_CHARS, DEFAULT_CANDIDATE_PAIRS,
};
pub use inferrer::{PairCountTable, PositionTable, QuotationReport, QuotationStyleInferrer};
pub use positions::{PositionCounts, PositionKind};
