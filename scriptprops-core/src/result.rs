//! Serializable analysis output

use crate::direction::{BidiCounts, Direction};
use crate::number::NumberReport;
use crate::quotation::QuotationReport;
use serde::{Deserialize, Serialize};

/// Direction verdict with its evidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionSummary {
    /// `left-to-right` or `right-to-left`
    pub value: Direction,
    /// Character counts per bidirectional category
    pub bidi_counts: BidiCounts,
    /// Human-readable verdict
    pub report_text: String,
}

/// Everything learned about one corpus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Script direction
    pub direction: DirectionSummary,
    /// Quotation mark conventions
    pub quotation_style: QuotationReport,
    /// Digital number conventions
    pub number_style: NumberReport,
    /// Characters processed
    pub total_characters_seen: u64,
    /// Language code passed through from the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang_code: Option<String>,
    /// Language name passed through from the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang_name: Option<String>,
}

impl AnalysisResult {
    /// Confirmed quotation pairs
    pub fn confirmed_pairs(&self) -> &[(char, char)] {
        &self.quotation_style.confirmed_pairs
    }

    /// Whether `(open, close)` was confirmed
    pub fn confirms(&self, open: char, close: char) -> bool {
        self.confirmed_pairs().contains(&(open, close))
    }
}
