//! Corpus-level quotation style inference

use super::candidates::{CandidatePair, CandidateTable};
use super::positions::{count_balanced_spans, PositionCounts};
use crate::accumulate::Accumulate;
use crate::chars::ClassifiedText;
use crate::config::InferenceThresholds;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Positional counts keyed by character
pub type PositionTable = BTreeMap<char, PositionCounts>;

/// Balanced-span counts keyed by opening then closing character
pub type PairCountTable = BTreeMap<char, BTreeMap<char, u64>>;

/// Summary handed to renderers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuotationReport {
    /// Pairs that passed the inference rules, in candidate order
    pub confirmed_pairs: Vec<(char, char)>,
    /// Positional counts of every observed candidate
    pub positional_counts: PositionTable,
    /// Non-zero balanced-span counts
    pub pair_counts: PairCountTable,
}

/// Infers which punctuation pairs act as quotation marks in a corpus
///
/// Counts accumulate across [`record`](Self::record) calls. Conclusions are
/// only drawn by [`finalize`](Self::finalize), which recomputes from the
/// current counts every time it runs; recording more text afterwards is
/// allowed and simply requires another `finalize`.
#[derive(Debug, Clone)]
pub struct QuotationStyleInferrer {
    table: CandidateTable,
    thresholds: InferenceThresholds,
    positions: Vec<PositionCounts>,
    pair_counts: Vec<u64>,
    confirmed: Vec<(char, char)>,
    total_chars: u64,
}

impl Default for QuotationStyleInferrer {
    fn default() -> Self {
        Self::new(CandidateTable::default(), InferenceThresholds::default())
    }
}

impl QuotationStyleInferrer {
    /// Create an inferrer over a candidate table
    pub fn new(table: CandidateTable, thresholds: InferenceThresholds) -> Self {
        let positions = vec![PositionCounts::default(); table.chars().len()];
        let pair_counts = vec![0; table.pairs().len()];
        Self {
            table,
            thresholds,
            positions,
            pair_counts,
            confirmed: Vec::new(),
            total_chars: 0,
        }
    }

    /// Create an inferrer with the default candidates and custom thresholds
    pub fn with_thresholds(thresholds: InferenceThresholds) -> Self {
        Self::new(CandidateTable::default(), thresholds)
    }

    /// Accumulate positional and pairing counts for one fragment
    pub fn record(&mut self, fragment: &str) {
        self.total_chars += fragment.chars().count() as u64;

        let present: Vec<bool> = self
            .table
            .chars()
            .iter()
            .map(|&ch| fragment.contains(ch))
            .collect();
        if !present.iter().any(|&p| p) {
            return;
        }

        let text = ClassifiedText::new(fragment);
        for (idx, &ch) in self.table.chars().iter().enumerate() {
            if present[idx] {
                self.positions[idx].merge(&PositionCounts::scan(&text, ch));
            }
        }

        for (idx, pair) in self.table.pairs().iter().enumerate() {
            if !pair.is_symmetric() && present[pair.open_idx] && present[pair.close_idx] {
                self.pair_counts[idx] += count_balanced_spans(&text, pair.open, pair.close);
            }
        }
    }

    /// Apply the inference rules to the current counts
    ///
    /// Replaces any previous conclusions, so repeated calls without
    /// intervening `record` calls yield the same pairs.
    pub fn finalize(&mut self) -> &[(char, char)] {
        self.confirmed.clear();
        for (idx, pair) in self.table.pairs().iter().enumerate() {
            let open = &self.positions[pair.open_idx];
            let close = &self.positions[pair.close_idx];
            if open.total == 0 || close.total == 0 {
                continue;
            }
            let confirmed = if pair.is_symmetric() {
                self.symmetric_holds(open)
            } else {
                self.positional_holds(open, close)
                    || self.pairing_holds(self.pair_counts[idx], open, close)
            };
            log::trace!(
                "candidate pair {}…{}: {}",
                pair.open,
                pair.close,
                if confirmed { "confirmed" } else { "rejected" }
            );
            if confirmed {
                self.confirmed.push((pair.open, pair.close));
            }
        }
        &self.confirmed
    }

    fn symmetric_holds(&self, counts: &PositionCounts) -> bool {
        let t = &self.thresholds;
        (counts.start + counts.end) as f64 >= t.symmetric_coverage * counts.total as f64
            && t.balanced(counts.start, counts.end)
    }

    fn positional_holds(&self, open: &PositionCounts, close: &PositionCounts) -> bool {
        let t = &self.thresholds;
        open.extended_start as f64 >= t.opener_coverage * open.total as f64
            && close.extended_end as f64 >= t.closer_min_coverage * close.total as f64
            && (close.extended_end + close.mid_word) as f64
                >= t.closer_coverage * close.total as f64
            && t.balanced(open.extended_start, close.extended_end)
    }

    fn pairing_holds(&self, spans: u64, open: &PositionCounts, close: &PositionCounts) -> bool {
        let t = &self.thresholds;
        spans > 0
            && spans as f64 >= t.pairing_coverage * open.total as f64
            && spans as f64 >= t.pairing_coverage * close.total as f64
    }

    /// Pairs confirmed by the last [`finalize`](Self::finalize)
    pub fn confirmed_pairs(&self) -> &[(char, char)] {
        &self.confirmed
    }

    /// Counts for one tracked character
    pub fn position_counts(&self, ch: char) -> Option<&PositionCounts> {
        self.table.index_of(ch).map(|idx| &self.positions[idx])
    }

    /// Balanced-span count for a candidate pair
    pub fn pair_count(&self, open: char, close: char) -> Option<u64> {
        self.table
            .pair_index(open, close)
            .map(|idx| self.pair_counts[idx])
    }

    /// Characters processed so far
    pub fn total_chars_seen(&self) -> u64 {
        self.total_chars
    }

    /// Candidate pairs in evaluation order
    pub fn candidate_pairs(&self) -> &[CandidatePair] {
        self.table.pairs()
    }

    /// Conclusions plus the raw count tables
    pub fn report(&self) -> QuotationReport {
        let positional_counts = self
            .table
            .chars()
            .iter()
            .zip(self.positions.iter())
            .filter(|(_, counts)| counts.total > 0)
            .map(|(&ch, counts)| (ch, *counts))
            .collect();

        let mut pair_counts = PairCountTable::new();
        for (pair, &count) in self.table.pairs().iter().zip(self.pair_counts.iter()) {
            if count > 0 {
                pair_counts
                    .entry(pair.open)
                    .or_default()
                    .insert(pair.close, count);
            }
        }

        QuotationReport {
            confirmed_pairs: self.confirmed.clone(),
            positional_counts,
            pair_counts,
        }
    }
}

impl Accumulate for QuotationStyleInferrer {
    fn identity() -> Self {
        Self::default()
    }

    /// Sums the counts, matching characters and pairs by value.
    ///
    /// An inferrer that has seen no text takes on the other side's candidate
    /// table. Counts for candidates missing from this side's table are
    /// dropped with a warning.
    fn combine(&mut self, other: &Self) {
        if other.total_chars == 0 {
            return;
        }
        if self.table.same_candidates(&other.table) {
            for (mine, theirs) in self.positions.iter_mut().zip(other.positions.iter()) {
                mine.merge(theirs);
            }
            for (mine, theirs) in self.pair_counts.iter_mut().zip(other.pair_counts.iter()) {
                *mine += theirs;
            }
        } else if self.total_chars == 0 {
            self.table = other.table.clone();
            self.positions = other.positions.clone();
            self.pair_counts = other.pair_counts.clone();
        } else {
            self.combine_by_key(other);
        }
        self.total_chars += other.total_chars;
    }
}

impl QuotationStyleInferrer {
    fn combine_by_key(&mut self, other: &Self) {
        for (&ch, counts) in other.table.chars().iter().zip(other.positions.iter()) {
            match self.table.index_of(ch) {
                Some(idx) => self.positions[idx].merge(counts),
                None if counts.total > 0 => {
                    log::warn!("dropping counts for untracked quotation candidate {ch:?}")
                }
                None => {}
            }
        }
        for (pair, &count) in other.table.pairs().iter().zip(other.pair_counts.iter()) {
            match self.table.pair_index(pair.open, pair.close) {
                Some(idx) => self.pair_counts[idx] += count,
                None if count > 0 => log::warn!(
                    "dropping counts for untracked quotation pair {:?}",
                    (pair.open, pair.close)
                ),
                None => {}
            }
        }
    }
}
