//! Whole-corpus writing direction classification

use super::category::{BidiCategory, BidiCounts};
use crate::accumulate::Accumulate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Dominant writing direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Latin, Cyrillic, ...
    #[default]
    #[serde(rename = "left-to-right")]
    LeftToRight,
    /// Hebrew, Arabic, ...
    #[serde(rename = "right-to-left")]
    RightToLeft,
}

impl Direction {
    /// Tag used in reports and serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::LeftToRight => "left-to-right",
            Direction::RightToLeft => "right-to-left",
        }
    }

    /// Whether a category contradicts this direction
    fn contradicted_by(self, category: BidiCategory) -> bool {
        match self {
            Direction::LeftToRight => category.is_strong_rtl(),
            Direction::RightToLeft => category.is_strong_ltr(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A strong character that runs against the expected direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionAnomaly {
    /// Offending character
    pub ch: char,
    /// Its category
    pub category: BidiCategory,
    /// Caller-supplied location label, if any
    pub location: Option<String>,
}

/// Callback receiving direction anomalies
pub type AnomalyCallback = Arc<dyn Fn(&DirectionAnomaly) + Send + Sync>;

/// Reports characters that contradict an expected direction
#[derive(Clone)]
pub struct DirectionMonitor {
    expected: Direction,
    callback: AnomalyCallback,
}

impl DirectionMonitor {
    /// Create a monitor for `expected`, calling `callback` on each anomaly
    pub fn new(
        expected: Direction,
        callback: impl Fn(&DirectionAnomaly) + Send + Sync + 'static,
    ) -> Self {
        Self {
            expected,
            callback: Arc::new(callback),
        }
    }

    /// Expected direction
    pub fn expected(&self) -> Direction {
        self.expected
    }

    fn observe(&self, ch: char, category: BidiCategory, location: Option<&str>) {
        if self.expected.contradicted_by(category) {
            (self.callback)(&DirectionAnomaly {
                ch,
                category,
                location: location.map(str::to_string),
            });
        }
    }
}

impl fmt::Debug for DirectionMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectionMonitor")
            .field("expected", &self.expected)
            .finish()
    }
}

/// Accumulates bidirectional category counts and votes on a direction
#[derive(Debug, Clone, Default)]
pub struct DirectionClassifier {
    counts: BidiCounts,
    lang_code: Option<String>,
    lang_name: Option<String>,
    monitor: Option<DirectionMonitor>,
}

impl DirectionClassifier {
    /// Create an empty classifier
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier labelled with language metadata for reports
    pub fn with_language(lang_code: Option<String>, lang_name: Option<String>) -> Self {
        Self {
            lang_code,
            lang_name,
            ..Self::default()
        }
    }

    /// Attach a direction monitor
    pub fn set_monitor(&mut self, monitor: Option<DirectionMonitor>) {
        self.monitor = monitor;
    }

    /// Count every character of `fragment` with weight 1
    pub fn record(&mut self, fragment: &str) {
        self.record_at(fragment, 1, None);
    }

    /// Count every character of `fragment` with `weight`
    pub fn record_weighted(&mut self, fragment: &str, weight: u64) {
        self.record_at(fragment, weight, None);
    }

    /// Count every character of `fragment`, labelling anomalies with `location`
    pub fn record_at(&mut self, fragment: &str, weight: u64, location: Option<&str>) {
        for ch in fragment.chars() {
            let category = BidiCategory::of(ch);
            self.counts.add(category, weight);
            if let Some(monitor) = &self.monitor {
                monitor.observe(ch, category, location);
            }
        }
    }

    /// Category counts so far
    pub fn bidi_counts(&self) -> &BidiCounts {
        &self.counts
    }

    /// `(ltr_count, rtl_count)`
    pub fn direction_counts(&self) -> (u64, u64) {
        (self.counts.ltr(), self.counts.rtl())
    }

    /// Majority vote over the two strong buckets; ties go left-to-right
    pub fn classify(&self) -> Direction {
        let (ltr, rtl) = self.direction_counts();
        if rtl > ltr {
            Direction::RightToLeft
        } else {
            Direction::LeftToRight
        }
    }

    /// Human-readable direction sentence
    pub fn report(&self, detailed: bool) -> String {
        let direction = self.classify();
        let subject = self
            .lang_name
            .as_deref()
            .or(self.lang_code.as_deref())
            .unwrap_or("the corpus");
        let mut message = format!("Determined script direction for {subject} to be {direction}");
        if detailed {
            let (ltr, rtl) = self.direction_counts();
            let (winning, losing) = match direction {
                Direction::RightToLeft => (rtl, ltr),
                Direction::LeftToRight => (ltr, rtl),
            };
            message.push_str(&format!(
                " with character direction counts {winning}:{losing} in favor."
            ));
        }
        message
    }
}

impl Accumulate for DirectionClassifier {
    fn identity() -> Self {
        Self::default()
    }

    fn combine(&mut self, other: &Self) {
        self.counts.merge(&other.counts);
    }
}

/// Fresh classification of a single string
///
/// Unreliable for strings of only a few characters.
pub fn string_direction(text: &str) -> Direction {
    let mut classifier = DirectionClassifier::new();
    classifier.record(text);
    classifier.classify()
}
