//! Corpus-level script property analysis
//!
//! Given raw text, this crate characterizes two properties of its writing
//! system using statistics rather than per-language tables:
//!
//! - **Direction**: per-character Unicode bidirectional categories are
//!   tallied and the corpus is declared left-to-right or right-to-left by
//!   majority vote.
//! - **Quotation style**: candidate quotation characters are profiled by
//!   where they occur relative to words (token start, token end, mid-word)
//!   and how often they form balanced spans; threshold rules then decide
//!   which opening/closing pairs the corpus actually uses.
//!
//! Digital number conventions (digit grouping, separators) are inferred
//! alongside.
//!
//! All accumulators count additively, so a corpus can be split across
//! workers and merged before the single finalization pass.
//!
//! # Example
//!
//! ```rust
//! use scriptprops_core::{Analyzer, Direction};
//!
//! let analyzer = Analyzer::builder().lang_code("eng").build().unwrap();
//! let result = analyzer
//!     .analyze_text("He said “yes” and left. She said “no” and stayed.")
//!     .unwrap();
//!
//! assert_eq!(result.direction.value, Direction::LeftToRight);
//! assert!(result.confirms('“', '”'));
//! ```

pub mod accumulate;
pub mod analyzer;
pub mod chars;
pub mod config;
pub mod direction;
pub mod error;
pub mod number;
pub mod quotation;
pub mod result;

pub use accumulate::Accumulate;
pub use analyzer::{analyze, Analyzer, AnalyzerBuilder, Input};
pub use config::InferenceThresholds;
pub use direction::{
    string_direction, switch_open_close_for_rtl, BidiCategory, BidiCounts, Direction,
    DirectionAnomaly, DirectionClassifier, DirectionMonitor, SWITCHABLE_RTL_DELIMITERS,
};
pub use error::{AnalysisError, Result};
pub use number::{DecimalGrouping, NumberReport, NumberStyle, NumberStyleInferrer};
pub use quotation::{
    CandidateTable, PositionCounts, PositionKind, QuotationReport, QuotationStyleInferrer,
};
pub use result::{AnalysisResult, DirectionSummary};
