//! Quotation candidate characters and pairs with O(1) index lookup

use crate::error::{AnalysisError, Result};
use std::collections::HashMap;

/// Characters tracked as potential quotation marks
///
/// Includes the ASCII quotes, the modifier-letter apostrophe and the soft
/// hyphen so that their positional profile shows up in reports even though
/// no candidate pair uses them.
pub const DEFAULT_CANDIDATE_CHARS: &[char] = &[
    '‘', '’', '‚', '"', '“', '”', '„', '«', '»', '‹', '›', '\'', 'ʼ', '\u{00AD}',
];

/// Opening/closing combinations eligible for confirmation, in evaluation order
pub const DEFAULT_CANDIDATE_PAIRS: &[(char, char)] = &[
    ('“', '”'),
    ('„', '”'),
    ('”', '”'),
    ('“', '“'),
    ('„', '“'),
    ('«', '»'),
    ('‹', '›'),
    ('‘', '’'),
    ('‚', '’'),
    ('’', '’'),
];

/// A candidate pair resolved to character indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidatePair {
    /// Opening character
    pub open: char,
    /// Closing character
    pub close: char,
    pub(crate) open_idx: usize,
    pub(crate) close_idx: usize,
}

impl CandidatePair {
    /// Same character on both sides
    #[inline]
    pub fn is_symmetric(&self) -> bool {
        self.open == self.close
    }
}

/// Fixed candidate set with validated pairs
#[derive(Debug, Clone)]
pub struct CandidateTable {
    chars: Vec<char>,
    index: HashMap<char, usize>,
    pairs: Vec<CandidatePair>,
}

impl CandidateTable {
    /// Build a table, rejecting pairs that reference untracked characters
    pub fn new(chars: &[char], pairs: &[(char, char)]) -> Result<Self> {
        let mut tracked = Vec::with_capacity(chars.len());
        let mut index = HashMap::with_capacity(chars.len());
        for &ch in chars {
            if !index.contains_key(&ch) {
                index.insert(ch, tracked.len());
                tracked.push(ch);
            }
        }

        let pairs = pairs
            .iter()
            .map(|&(open, close)| match (index.get(&open), index.get(&close)) {
                (Some(&open_idx), Some(&close_idx)) => Ok(CandidatePair {
                    open,
                    close,
                    open_idx,
                    close_idx,
                }),
                _ => Err(AnalysisError::InvalidCandidatePair { open, close }),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            chars: tracked,
            index,
            pairs,
        })
    }

    /// Tracked characters in table order
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Candidate pairs in evaluation order
    pub fn pairs(&self) -> &[CandidatePair] {
        &self.pairs
    }

    /// Index of a tracked character
    #[inline]
    pub fn index_of(&self, ch: char) -> Option<usize> {
        self.index.get(&ch).copied()
    }

    /// Index of a candidate pair
    pub fn pair_index(&self, open: char, close: char) -> Option<usize> {
        self.pairs
            .iter()
            .position(|pair| pair.open == open && pair.close == close)
    }

    /// Same characters and pairs, in the same order
    pub fn same_candidates(&self, other: &CandidateTable) -> bool {
        self.chars == other.chars && self.pairs == other.pairs
    }
}

impl Default for CandidateTable {
    fn default() -> Self {
        let mut index = HashMap::with_capacity(DEFAULT_CANDIDATE_CHARS.len());
        for (i, &ch) in DEFAULT_CANDIDATE_CHARS.iter().enumerate() {
            index.insert(ch, i);
        }
        let pairs = DEFAULT_CANDIDATE_PAIRS
            .iter()
            .filter_map(|&(open, close)| {
                Some(CandidatePair {
                    open,
                    close,
                    open_idx: *index.get(&open)?,
                    close_idx: *index.get(&close)?,
                })
            })
            .collect();
        Self {
            chars: DEFAULT_CANDIDATE_CHARS.to_vec(),
            index,
            pairs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_resolves_all_pairs() {
        let table = CandidateTable::default();
        assert_eq!(table.pairs().len(), DEFAULT_CANDIDATE_PAIRS.len());
        assert_eq!(table.chars().len(), DEFAULT_CANDIDATE_CHARS.len());

        let checked =
            CandidateTable::new(DEFAULT_CANDIDATE_CHARS, DEFAULT_CANDIDATE_PAIRS).unwrap();
        assert_eq!(checked.pairs(), table.pairs());
    }

    #[test]
    fn test_rejects_untracked_pair() {
        let result = CandidateTable::new(&['“', '”'], &[('“', '”'), ('«', '»')]);
        match result {
            Err(AnalysisError::InvalidCandidatePair { open, close }) => {
                assert_eq!((open, close), ('«', '»'));
            }
            other => panic!("expected InvalidCandidatePair, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_chars_collapse() {
        let table = CandidateTable::new(&['“', '”', '“'], &[('“', '”')]).unwrap();
        assert_eq!(table.chars(), &['“', '”']);
        assert_eq!(table.index_of('”'), Some(1));
    }

    #[test]
    fn test_symmetric_flag() {
        let table = CandidateTable::default();
        let symmetric: Vec<_> = table
            .pairs()
            .iter()
            .filter(|pair| pair.is_symmetric())
            .map(|pair| pair.open)
            .collect();
        assert_eq!(symmetric, vec!['”', '“', '’']);
    }
}
