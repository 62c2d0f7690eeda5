//! Plain text output formatter

use super::{code_point, OutputFormatter};
use anyhow::Result;
use scriptprops_core::{AnalysisResult, DecimalGrouping, PositionCounts};
use std::io::Write;

/// Plain text formatter - a human-readable report
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_pairs(&mut self, result: &AnalysisResult) -> Result<()> {
        writeln!(self.writer, "Quotation pairs:")?;
        if result.confirmed_pairs().is_empty() {
            writeln!(self.writer, "  (none)")?;
        }
        for &(open, close) in result.confirmed_pairs() {
            writeln!(
                self.writer,
                "  {open} {close}  ({} {})",
                code_point(open),
                code_point(close)
            )?;
        }
        Ok(())
    }

    fn write_positions(&mut self, result: &AnalysisResult) -> Result<()> {
        let table = &result.quotation_style.positional_counts;
        if table.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "Positional counts:")?;
        writeln!(
            self.writer,
            "  {:<4} {:<8} {:>7} {:>9} {:>7} {:>7} {:>8} {:>7}",
            "char", "code", "start", "ext_start", "end", "ext_end", "mid_word", "total"
        )?;
        for (&ch, counts) in table {
            let PositionCounts {
                start,
                extended_start,
                end,
                extended_end,
                mid_word,
                total,
            } = *counts;
            writeln!(
                self.writer,
                "  {:<4} {:<8} {:>7} {:>9} {:>7} {:>7} {:>8} {:>7}",
                ch,
                code_point(ch),
                start,
                extended_start,
                end,
                extended_end,
                mid_word,
                total
            )?;
        }
        Ok(())
    }

    fn write_numbers(&mut self, result: &AnalysisResult) -> Result<()> {
        let style = &result.number_style.style;
        writeln!(self.writer, "Number style:")?;
        let grouping = match style.decimal_grouping {
            Some(DecimalGrouping::Western) => "western",
            Some(DecimalGrouping::Indian) => "indian",
            Some(DecimalGrouping::Chinese) => "chinese",
            None => "undecided",
        };
        writeln!(self.writer, "  decimal grouping: {grouping}")?;
        writeln!(
            self.writer,
            "  decimal separator: {}",
            describe_separator(style.decimal_separator)
        )?;
        writeln!(
            self.writer,
            "  digit group separator: {}",
            describe_separator(style.digit_group_separator)
        )?;
        Ok(())
    }
}

fn describe_separator(separator: Option<char>) -> String {
    match separator {
        Some(ch) => format!("{ch} ({})", code_point(ch)),
        None => "undecided".to_string(),
    }
}

impl<W: Write> OutputFormatter for TextFormatter<W> {
    fn write_result(&mut self, result: &AnalysisResult) -> Result<()> {
        writeln!(self.writer, "{}", result.direction.report_text)?;
        writeln!(self.writer)?;
        self.write_pairs(result)?;
        self.write_positions(result)?;
        writeln!(self.writer)?;
        self.write_numbers(result)?;
        self.writer.flush()?;
        Ok(())
    }
}
