//! Boundary-sensitive positional scanners
//!
//! Each scanner counts non-overlapping occurrences of a candidate character
//! in one of the word-relative positions used by the inference rules.
//! Matching scans left to right and resumes after the end of each match,
//! so a character swallowed by a previous match is not counted again.

use crate::chars::{CharClass, ClassifiedText};
use serde::{Deserialize, Serialize};

/// Word-relative position of a candidate occurrence
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PositionKind {
    /// Followed by a letter, not preceded by a letter or mark
    Start,
    /// Opens a token, tolerating adjacent punctuation
    ExtendedStart,
    /// Preceded by a letter or mark, not followed by a letter
    End,
    /// Closes a token, tolerating adjacent punctuation
    ExtendedEnd,
    /// Between a letter or mark and a letter
    MidWord,
    /// Every occurrence
    Total,
}

impl PositionKind {
    /// All kinds in report order
    pub const ALL: [PositionKind; 6] = [
        PositionKind::Start,
        PositionKind::ExtendedStart,
        PositionKind::End,
        PositionKind::ExtendedEnd,
        PositionKind::MidWord,
        PositionKind::Total,
    ];
}

/// Positional counts for one candidate character
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionCounts {
    /// [`PositionKind::Start`]
    pub start: u64,
    /// [`PositionKind::ExtendedStart`]
    pub extended_start: u64,
    /// [`PositionKind::End`]
    pub end: u64,
    /// [`PositionKind::ExtendedEnd`]
    pub extended_end: u64,
    /// [`PositionKind::MidWord`]
    pub mid_word: u64,
    /// [`PositionKind::Total`]
    pub total: u64,
}

impl PositionCounts {
    /// Count for one kind
    pub fn get(&self, kind: PositionKind) -> u64 {
        match kind {
            PositionKind::Start => self.start,
            PositionKind::ExtendedStart => self.extended_start,
            PositionKind::End => self.end,
            PositionKind::ExtendedEnd => self.extended_end,
            PositionKind::MidWord => self.mid_word,
            PositionKind::Total => self.total,
        }
    }

    /// Scan `text` for `ch`
    pub fn scan(text: &ClassifiedText, ch: char) -> Self {
        Self {
            start: count_start(text, ch),
            extended_start: count_extended_start(text, ch),
            end: count_end(text, ch),
            extended_end: count_extended_end(text, ch),
            mid_word: count_mid_word(text, ch),
            total: text.positions(ch).count() as u64,
        }
    }

    /// Add every field of `other`
    pub fn merge(&mut self, other: &PositionCounts) {
        self.start += other.start;
        self.extended_start += other.extended_start;
        self.end += other.end;
        self.extended_end += other.extended_end;
        self.mid_word += other.mid_word;
        self.total += other.total;
    }
}

fn prev_class(text: &ClassifiedText, i: usize) -> Option<CharClass> {
    i.checked_sub(1).and_then(|p| text.class_at(p))
}

fn count_where(text: &ClassifiedText, ch: char, pred: impl Fn(usize) -> bool) -> u64 {
    text.positions(ch).filter(|&i| pred(i)).count() as u64
}

/// Followed by a letter, not preceded by a letter or mark
pub fn count_start(text: &ClassifiedText, ch: char) -> u64 {
    count_where(text, ch, |i| {
        !prev_class(text, i).is_some_and(CharClass::is_letter_or_mark)
            && text.class_at(i + 1).is_some_and(CharClass::is_letter)
    })
}

/// Preceded by a letter or mark, not followed by a letter
pub fn count_end(text: &ClassifiedText, ch: char) -> u64 {
    count_where(text, ch, |i| {
        prev_class(text, i).is_some_and(CharClass::is_letter_or_mark)
            && !text.class_at(i + 1).is_some_and(CharClass::is_letter)
    })
}

/// Preceded by a letter or mark and followed by a letter
pub fn count_mid_word(text: &ClassifiedText, ch: char) -> u64 {
    count_where(text, ch, |i| {
        prev_class(text, i).is_some_and(CharClass::is_letter_or_mark)
            && text.class_at(i + 1).is_some_and(CharClass::is_letter)
    })
}

/// No alphanumeric earlier in its non-space run, some letter or digit later in it
///
/// A match extends to the last letter or digit of the run.
pub fn count_extended_start(text: &ClassifiedText, ch: char) -> u64 {
    let mut count = 0;
    let mut resume = 0;
    for i in text.positions(ch) {
        if i < resume {
            continue;
        }
        let run_start = text.run_start(i);
        if text.any_in(run_start..i, CharClass::is_alphanumeric) {
            continue;
        }
        let run_end = text.run_end(i + 1);
        let last_alnum = (i + 1..run_end)
            .rev()
            .find(|&k| text.class_at(k).is_some_and(CharClass::is_letter_or_digit));
        if let Some(p) = last_alnum {
            count += 1;
            resume = p;
        }
    }
    count
}

/// Closes an alphanumeric run and no letter or digit follows in its own run
///
/// The closing mark may be separated from the run by `’` plus one
/// whitespace character.
pub fn count_extended_end(text: &ClassifiedText, ch: char) -> u64 {
    let n = text.len();
    let mut count = 0;
    let mut s = 1;
    while s <= n {
        if !prev_class(text, s).is_some_and(CharClass::is_alphanumeric) {
            s += 1;
            continue;
        }
        match extended_end_at(text, ch, s) {
            Some(end) => {
                count += 1;
                s = end.max(s + 1);
            }
            // Later starts in this run see a subset of the same candidates.
            None => s = text.run_end(s) + 1,
        }
    }
    count
}

/// Longest match starting at `s`, returning its exclusive end
fn extended_end_at(text: &ClassifiedText, ch: char, s: usize) -> Option<usize> {
    let run_end = text.run_end(s);
    for k in (s..=run_end).rev() {
        if text.char_at(k) == Some('’')
            && text.class_at(k + 1).is_some_and(CharClass::is_space)
            && text.char_at(k + 2) == Some(ch)
            && closes_run(text, k + 3)
        {
            return Some(k + 3);
        }
        if text.char_at(k) == Some(ch) && closes_run(text, k + 1) {
            return Some(k + 1);
        }
    }
    None
}

/// No letter or digit in the non-space run starting at `p`
fn closes_run(text: &ClassifiedText, p: usize) -> bool {
    let run_end = text.run_end(p);
    !text.any_in(p..run_end, CharClass::is_letter_or_digit)
}

/// Balanced `open … close` spans with neither character in between
///
/// The opener must not follow a letter (optionally trailed by marks) and
/// the closer must not be followed by a letter.
pub fn count_balanced_spans(text: &ClassifiedText, open: char, close: char) -> u64 {
    let n = text.len();
    let mut count = 0;
    let mut i = 0;
    while i < n {
        if text.char_at(i) == Some(open) && !follows_letter(text, i) {
            let next = (i + 1..n).find(|&j| matches!(text.char_at(j), Some(c) if c == open || c == close));
            if let Some(j) = next {
                if text.char_at(j) == Some(close)
                    && !text.class_at(j + 1).is_some_and(CharClass::is_letter)
                {
                    count += 1;
                    i = j + 1;
                    continue;
                }
            }
        }
        i += 1;
    }
    count
}

/// A letter, possibly followed by combining marks, ends right before `i`
fn follows_letter(text: &ClassifiedText, i: usize) -> bool {
    let mut k = i;
    while k > 0 && text.class_at(k - 1) == Some(CharClass::Mark) {
        k -= 1;
    }
    prev_class(text, k).is_some_and(CharClass::is_letter)
}
