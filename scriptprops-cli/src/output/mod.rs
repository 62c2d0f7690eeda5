//! Output formatting module

use anyhow::Result;
use scriptprops_core::AnalysisResult;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render one analysis result and flush the writer
    fn write_result(&mut self, result: &AnalysisResult) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// `U+XXXX` notation for a character
pub fn code_point(ch: char) -> String {
    format!("U+{:04X}", ch as u32)
}
