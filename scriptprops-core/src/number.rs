//! Digital number style inference
//!
//! Numbers are reduced to shape patterns (`1,234.5` becomes `D,DDD.D`);
//! pattern frequencies then vote on digit grouping and separators.

use crate::accumulate::Accumulate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Unique examples kept per pattern before truncating
pub const MAX_EXAMPLES: usize = 10;

/// Marker appended to a truncated example list
pub const ELLIPSIS: &str = "…";

const GROUP_SEPARATORS: [char; 3] = [',', '.', '\u{202F}'];
const DECIMAL_SEPARATORS: [char; 2] = [',', '.'];

/// Digit grouping convention
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DecimalGrouping {
    /// Groups of three: 1,234,567
    Western,
    /// Lakh/crore: 12,34,567
    Indian,
    /// Groups of four: 123,4567
    Chinese,
}

struct SeparatorShapes {
    separator: char,
    western: Regex,
    indian: Regex,
    chinese: Regex,
}

struct NumberShapes {
    number: Regex,
    digit: Regex,
    grouping: Vec<SeparatorShapes>,
    decimal: Vec<(char, Regex)>,
}

static SHAPES: OnceLock<NumberShapes> = OnceLock::new();

fn compile_shapes() -> Result<NumberShapes, regex::Error> {
    let mut grouping = Vec::with_capacity(GROUP_SEPARATORS.len());
    for separator in GROUP_SEPARATORS {
        let sep = regex::escape(&separator.to_string());
        grouping.push(SeparatorShapes {
            separator,
            western: Regex::new(&format!(r"^DD?D?(?:{sep}DDD)+$"))?,
            indian: Regex::new(&format!(r"^DD?(?:{sep}DD)*{sep}DDD$"))?,
            chinese: Regex::new(&format!(r"^DD?D?D?(?:{sep}DDDD)+$"))?,
        });
    }

    let mut decimal = Vec::with_capacity(DECIMAL_SEPARATORS.len());
    for separator in DECIMAL_SEPARATORS {
        let sep = regex::escape(&separator.to_string());
        decimal.push((separator, Regex::new(&format!(r"^DD?D?{sep}DD?$"))?));
    }

    Ok(NumberShapes {
        number: Regex::new(r"-?\d+(?:(?:\pP|\pS|\pZ)+\d+)*")?,
        digit: Regex::new(r"\d")?,
        grouping,
        decimal,
    })
}

fn shapes() -> &'static NumberShapes {
    SHAPES.get_or_init(|| compile_shapes().expect("built-in number patterns are valid"))
}

/// Up to [`MAX_EXAMPLES`] unique examples of one pattern
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Examples {
    samples: Vec<String>,
    truncated: bool,
}

impl Examples {
    fn add(&mut self, example: &str) {
        if self.samples.iter().any(|s| s == example) {
            return;
        }
        if self.samples.len() < MAX_EXAMPLES {
            self.samples.push(example.to_string());
        } else {
            self.truncated = true;
        }
    }

    fn merge(&mut self, other: &Examples) {
        for sample in &other.samples {
            self.add(sample);
        }
        self.truncated |= other.truncated;
    }

    fn to_list(&self) -> Vec<String> {
        let mut list = self.samples.clone();
        if self.truncated {
            list.push(ELLIPSIS.to_string());
        }
        list
    }
}

/// Conclusions drawn from the pattern counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberStyle {
    /// Grouping convention, if one dominates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimal_grouping: Option<DecimalGrouping>,
    /// Decimal separator, if one dominates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimal_separator: Option<char>,
    /// Digit group separator, if one dominates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digit_group_separator: Option<char>,
}

/// Summary handed to renderers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberReport {
    /// Inferred style
    pub style: NumberStyle,
    /// Occurrences per pattern
    pub pattern_counts: BTreeMap<String, u64>,
    /// Unique examples per pattern, `…` marking truncation
    pub pattern_examples: BTreeMap<String, Vec<String>>,
}

/// Accumulates digital number patterns
#[derive(Debug, Clone, Default)]
pub struct NumberStyleInferrer {
    counts: BTreeMap<String, u64>,
    examples: BTreeMap<String, Examples>,
    style: NumberStyle,
}

impl NumberStyleInferrer {
    /// Create an empty inferrer
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the number patterns of one fragment
    pub fn record(&mut self, fragment: &str) {
        let shapes = shapes();
        for found in shapes.number.find_iter(fragment) {
            let number = found.as_str();
            let pattern = shapes.digit.replace_all(number, "D").into_owned();
            *self.counts.entry(pattern.clone()).or_insert(0) += 1;
            self.examples.entry(pattern).or_default().add(number);
        }
    }

    /// Vote on grouping and separators; recomputed on every call
    pub fn finalize(&mut self) -> &NumberStyle {
        let shapes = shapes();
        let mut grouping_votes: BTreeMap<DecimalGrouping, u64> = BTreeMap::new();
        let mut group_separator_votes: BTreeMap<char, u64> = BTreeMap::new();
        let mut decimal_votes: BTreeMap<char, u64> = BTreeMap::new();

        for (pattern, &count) in &self.counts {
            for shape in &shapes.grouping {
                let mut matched = false;
                for (grouping, regex) in [
                    (DecimalGrouping::Western, &shape.western),
                    (DecimalGrouping::Indian, &shape.indian),
                    (DecimalGrouping::Chinese, &shape.chinese),
                ] {
                    if regex.is_match(pattern) {
                        *grouping_votes.entry(grouping).or_insert(0) += count;
                        matched = true;
                    }
                }
                if matched {
                    *group_separator_votes.entry(shape.separator).or_insert(0) += count;
                }
            }
            for (separator, regex) in &shapes.decimal {
                if regex.is_match(pattern) {
                    *decimal_votes.entry(*separator).or_insert(0) += count;
                }
            }
        }

        self.style = NumberStyle {
            decimal_grouping: exclusive_max(&grouping_votes),
            decimal_separator: exclusive_max(&decimal_votes),
            digit_group_separator: exclusive_max(&group_separator_votes),
        };
        &self.style
    }

    /// Style from the last [`finalize`](Self::finalize)
    pub fn style(&self) -> &NumberStyle {
        &self.style
    }

    /// Conclusions plus the raw tables
    pub fn report(&self) -> NumberReport {
        NumberReport {
            style: self.style.clone(),
            pattern_counts: self.counts.clone(),
            pattern_examples: self
                .examples
                .iter()
                .map(|(pattern, examples)| (pattern.clone(), examples.to_list()))
                .collect(),
        }
    }
}

impl Accumulate for NumberStyleInferrer {
    fn identity() -> Self {
        Self::default()
    }

    fn combine(&mut self, other: &Self) {
        for (pattern, count) in &other.counts {
            *self.counts.entry(pattern.clone()).or_insert(0) += count;
        }
        for (pattern, examples) in &other.examples {
            self.examples
                .entry(pattern.clone())
                .or_default()
                .merge(examples);
        }
    }
}

/// Key with the strictly highest non-zero count; ties give `None`
fn exclusive_max<K: Copy>(votes: &BTreeMap<K, u64>) -> Option<K> {
    let highest = votes.values().copied().max().filter(|&max| max > 0)?;
    let mut winners = votes.iter().filter(|(_, count)| **count == highest);
    let (key, _) = winners.next()?;
    if winners.next().is_some() {
        None
    } else {
        Some(*key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn infer(text: &str) -> NumberStyleInferrer {
        let mut inferrer = NumberStyleInferrer::new();
        for line in text.lines() {
            inferrer.record(line);
        }
        inferrer.finalize();
        inferrer
    }

    #[test]
    fn test_patterns() {
        let inferrer = infer("Paid 1,234.50 and 7 and -12");
        let report = inferrer.report();
        assert_eq!(report.pattern_counts.get("D,DDD.DD"), Some(&1));
        assert_eq!(report.pattern_counts.get("D"), Some(&1));
        assert_eq!(report.pattern_counts.get("-DD"), Some(&1));
    }

    #[test]
    fn test_western_grouping() {
        let inferrer = infer("1,234 and 56,789 and 1,000,000\nalso 3.5 and 2.25");
        let style = inferrer.style();
        assert_eq!(style.decimal_grouping, Some(DecimalGrouping::Western));
        assert_eq!(style.digit_group_separator, Some(','));
        assert_eq!(style.decimal_separator, Some('.'));
    }

    #[test]
    fn test_indian_grouping() {
        let inferrer = infer("12,34,567 and 1,23,45,678 and 99,99,999");
        assert_eq!(
            inferrer.style().decimal_grouping,
            Some(DecimalGrouping::Indian)
        );
    }

    #[test]
    fn test_no_numbers_gives_no_style() {
        let inferrer = infer("no digits here");
        assert_eq!(inferrer.style(), &NumberStyle::default());
        assert!(inferrer.report().pattern_counts.is_empty());
    }

    #[test]
    fn test_tie_is_undecided() {
        let inferrer = infer("3.5 and 3,5");
        assert_eq!(inferrer.style().decimal_separator, None);
    }

    #[test]
    fn test_examples_truncate() {
        let text: Vec<String> = (10..30).map(|n| n.to_string()).collect();
        let inferrer = infer(&text.join("\n"));
        let examples = &inferrer.report().pattern_examples["DD"];
        assert_eq!(examples.len(), MAX_EXAMPLES + 1);
        assert_eq!(examples.last().map(String::as_str), Some(ELLIPSIS));
    }

    #[test]
    fn test_examples_are_unique() {
        let inferrer = infer("42 and 42 and 42");
        assert_eq!(inferrer.report().pattern_examples["DD"], vec!["42"]);
        assert_eq!(inferrer.report().pattern_counts["DD"], 3);
    }

    #[test]
    fn test_combine() {
        let mut left = NumberStyleInferrer::new();
        left.record("1,234");
        let mut right = NumberStyleInferrer::new();
        right.record("5,678 and 9");
        left.combine(&right);
        left.finalize();
        assert_eq!(left.report().pattern_counts["D,DDD"], 2);
        assert_eq!(left.style().digit_group_separator, Some(','));
    }
}
