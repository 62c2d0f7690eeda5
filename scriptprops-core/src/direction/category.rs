//! Bidirectional category table
//!
//! Counts are kept in a fixed array indexed by [`BidiCategory`] instead of a
//! map keyed by label, so no bucket is ever created implicitly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use unicode_bidi::{bidi_class, BidiClass};
use unicode_script::{Script, UnicodeScript};

/// Unicode bidirectional category of a character
///
/// Mirrors the UAX #9 classes, plus [`BidiCategory::Unassigned`] for code
/// points without a defined category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BidiCategory {
    /// Left-to-right
    LeftToRight,
    /// Right-to-left (Hebrew family)
    RightToLeft,
    /// Arabic letter
    ArabicLetter,
    /// European number
    EuropeanNumber,
    /// European separator
    EuropeanSeparator,
    /// European number terminator
    EuropeanTerminator,
    /// Arabic number
    ArabicNumber,
    /// Common number separator
    CommonSeparator,
    /// Non-spacing mark
    NonspacingMark,
    /// Boundary neutral
    BoundaryNeutral,
    /// Paragraph separator
    ParagraphSeparator,
    /// Segment separator
    SegmentSeparator,
    /// Whitespace
    Whitespace,
    /// Other neutral
    OtherNeutral,
    /// Left-to-right embedding
    LeftToRightEmbedding,
    /// Left-to-right override
    LeftToRightOverride,
    /// Right-to-left embedding
    RightToLeftEmbedding,
    /// Right-to-left override
    RightToLeftOverride,
    /// Pop directional format
    PopDirectionalFormat,
    /// Left-to-right isolate
    LeftToRightIsolate,
    /// Right-to-left isolate
    RightToLeftIsolate,
    /// First strong isolate
    FirstStrongIsolate,
    /// Pop directional isolate
    PopDirectionalIsolate,
    /// No category defined for the code point
    Unassigned,
}

impl BidiCategory {
    /// Number of categories
    pub const COUNT: usize = 24;

    /// All categories in table order
    pub const ALL: [BidiCategory; Self::COUNT] = [
        BidiCategory::LeftToRight,
        BidiCategory::RightToLeft,
        BidiCategory::ArabicLetter,
        BidiCategory::EuropeanNumber,
        BidiCategory::EuropeanSeparator,
        BidiCategory::EuropeanTerminator,
        BidiCategory::ArabicNumber,
        BidiCategory::CommonSeparator,
        BidiCategory::NonspacingMark,
        BidiCategory::BoundaryNeutral,
        BidiCategory::ParagraphSeparator,
        BidiCategory::SegmentSeparator,
        BidiCategory::Whitespace,
        BidiCategory::OtherNeutral,
        BidiCategory::LeftToRightEmbedding,
        BidiCategory::LeftToRightOverride,
        BidiCategory::RightToLeftEmbedding,
        BidiCategory::RightToLeftOverride,
        BidiCategory::PopDirectionalFormat,
        BidiCategory::LeftToRightIsolate,
        BidiCategory::RightToLeftIsolate,
        BidiCategory::FirstStrongIsolate,
        BidiCategory::PopDirectionalIsolate,
        BidiCategory::Unassigned,
    ];

    /// Look up the category of a character
    ///
    /// Unassigned code points and noncharacters fall into
    /// [`BidiCategory::Unassigned`], which neither direction bucket tracks.
    /// Private-use characters keep their `L` category.
    pub fn of(ch: char) -> Self {
        if ch.script() == Script::Unknown && !is_private_use(ch) {
            return BidiCategory::Unassigned;
        }
        match bidi_class(ch) {
            BidiClass::L => BidiCategory::LeftToRight,
            BidiClass::R => BidiCategory::RightToLeft,
            BidiClass::AL => BidiCategory::ArabicLetter,
            BidiClass::EN => BidiCategory::EuropeanNumber,
            BidiClass::ES => BidiCategory::EuropeanSeparator,
            BidiClass::ET => BidiCategory::EuropeanTerminator,
            BidiClass::AN => BidiCategory::ArabicNumber,
            BidiClass::CS => BidiCategory::CommonSeparator,
            BidiClass::NSM => BidiCategory::NonspacingMark,
            BidiClass::BN => BidiCategory::BoundaryNeutral,
            BidiClass::B => BidiCategory::ParagraphSeparator,
            BidiClass::S => BidiCategory::SegmentSeparator,
            BidiClass::WS => BidiCategory::Whitespace,
            BidiClass::ON => BidiCategory::OtherNeutral,
            BidiClass::LRE => BidiCategory::LeftToRightEmbedding,
            BidiClass::LRO => BidiCategory::LeftToRightOverride,
            BidiClass::RLE => BidiCategory::RightToLeftEmbedding,
            BidiClass::RLO => BidiCategory::RightToLeftOverride,
            BidiClass::PDF => BidiCategory::PopDirectionalFormat,
            BidiClass::LRI => BidiCategory::LeftToRightIsolate,
            BidiClass::RLI => BidiCategory::RightToLeftIsolate,
            BidiClass::FSI => BidiCategory::FirstStrongIsolate,
            BidiClass::PDI => BidiCategory::PopDirectionalIsolate,
        }
    }

    /// Unicode short label (`L`, `R`, `AL`, ...)
    pub fn label(self) -> &'static str {
        match self {
            BidiCategory::LeftToRight => "L",
            BidiCategory::RightToLeft => "R",
            BidiCategory::ArabicLetter => "AL",
            BidiCategory::EuropeanNumber => "EN",
            BidiCategory::EuropeanSeparator => "ES",
            BidiCategory::EuropeanTerminator => "ET",
            BidiCategory::ArabicNumber => "AN",
            BidiCategory::CommonSeparator => "CS",
            BidiCategory::NonspacingMark => "NSM",
            BidiCategory::BoundaryNeutral => "BN",
            BidiCategory::ParagraphSeparator => "B",
            BidiCategory::SegmentSeparator => "S",
            BidiCategory::Whitespace => "WS",
            BidiCategory::OtherNeutral => "ON",
            BidiCategory::LeftToRightEmbedding => "LRE",
            BidiCategory::LeftToRightOverride => "LRO",
            BidiCategory::RightToLeftEmbedding => "RLE",
            BidiCategory::RightToLeftOverride => "RLO",
            BidiCategory::PopDirectionalFormat => "PDF",
            BidiCategory::LeftToRightIsolate => "LRI",
            BidiCategory::RightToLeftIsolate => "RLI",
            BidiCategory::FirstStrongIsolate => "FSI",
            BidiCategory::PopDirectionalIsolate => "PDI",
            BidiCategory::Unassigned => "unassigned",
        }
    }

    /// Strong right-to-left letter (`R` or `AL`)
    pub fn is_strong_rtl(self) -> bool {
        matches!(self, BidiCategory::RightToLeft | BidiCategory::ArabicLetter)
    }

    /// Strong left-to-right letter (`L`)
    pub fn is_strong_ltr(self) -> bool {
        self == BidiCategory::LeftToRight
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// General category `Co`; the script table reports these as `Unknown`
fn is_private_use(ch: char) -> bool {
    matches!(
        ch,
        '\u{E000}'..='\u{F8FF}' | '\u{F0000}'..='\u{FFFFD}' | '\u{100000}'..='\u{10FFFD}'
    )
}

/// Per-category character counts
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BidiCounts {
    counts: [u64; BidiCategory::COUNT],
}

impl Default for BidiCounts {
    fn default() -> Self {
        Self {
            counts: [0; BidiCategory::COUNT],
        }
    }
}

impl BidiCounts {
    /// Add `weight` to a category
    #[inline]
    pub fn add(&mut self, category: BidiCategory, weight: u64) {
        self.counts[category.index()] += weight;
    }

    /// Count for a category
    #[inline]
    pub fn get(&self, category: BidiCategory) -> u64 {
        self.counts[category.index()]
    }

    /// Sum over all categories
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Characters counted as left-to-right
    pub fn ltr(&self) -> u64 {
        self.get(BidiCategory::LeftToRight)
    }

    /// Characters counted as right-to-left
    pub fn rtl(&self) -> u64 {
        self.get(BidiCategory::ArabicLetter) + self.get(BidiCategory::RightToLeft)
    }

    /// Add every count of `other`
    pub fn merge(&mut self, other: &BidiCounts) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += theirs;
        }
    }

    /// Non-zero counts keyed by label
    pub fn to_label_map(&self) -> BTreeMap<String, u64> {
        BidiCategory::ALL
            .iter()
            .filter(|category| self.get(**category) > 0)
            .map(|category| (category.label().to_string(), self.get(*category)))
            .collect()
    }
}

impl Serialize for BidiCounts {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_label_map().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BidiCounts {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::<String, u64>::deserialize(deserializer)?;
        let mut counts = BidiCounts::default();
        for (label, count) in map {
            let category = BidiCategory::ALL
                .iter()
                .find(|category| category.label() == label)
                .ok_or_else(|| {
                    serde::de::Error::custom(format!("unknown bidi category '{label}'"))
                })?;
            counts.add(*category, count);
        }
        Ok(counts)
    }
}
