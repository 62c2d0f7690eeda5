//! Character classification for positional pattern matching
//!
//! Positional counts only care whether a neighbour is a letter, a combining
//! mark, a digit or whitespace, so each fragment is classified once up front
//! and the scanners work over the resulting slice.

use regex::Regex;
use std::sync::OnceLock;

/// Coarse class of a character as seen by the positional scanners
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharClass {
    /// Letter, general category `L` (including modifier letters such as U+02BC)
    Letter,
    /// Combining mark, general category `M` (spacing marks included)
    Mark,
    /// Decimal digit, general category `Nd`
    Digit,
    /// Whitespace, including the information separators U+001C..U+001F
    Space,
    /// Anything else (punctuation, symbols, letter numbers)
    Other,
}

struct ClassPatterns {
    mark: Regex,
    letter: Regex,
    digit: Regex,
    space: Regex,
}

static PATTERNS: OnceLock<ClassPatterns> = OnceLock::new();

fn compile_patterns() -> Result<ClassPatterns, regex::Error> {
    Ok(ClassPatterns {
        mark: Regex::new(r"\A\p{M}\z")?,
        letter: Regex::new(r"\A\p{L}\z")?,
        digit: Regex::new(r"\A\p{Nd}\z")?,
        space: Regex::new(r"\A[\s\x1C-\x1F]\z")?,
    })
}

fn patterns() -> &'static ClassPatterns {
    PATTERNS.get_or_init(|| compile_patterns().expect("built-in class patterns are valid"))
}

impl CharClass {
    /// Classify a character by its general category
    pub fn of(ch: char) -> Self {
        if ch.is_ascii() {
            return Self::of_ascii(ch);
        }
        let mut buf = [0; 4];
        let s = ch.encode_utf8(&mut buf);
        let patterns = patterns();
        if patterns.mark.is_match(s) {
            CharClass::Mark
        } else if patterns.letter.is_match(s) {
            CharClass::Letter
        } else if patterns.digit.is_match(s) {
            CharClass::Digit
        } else if patterns.space.is_match(s) {
            CharClass::Space
        } else {
            CharClass::Other
        }
    }

    fn of_ascii(ch: char) -> Self {
        match ch {
            'a'..='z' | 'A'..='Z' => CharClass::Letter,
            '0'..='9' => CharClass::Digit,
            '\t'..='\r' | '\x1C'..='\x1F' | ' ' => CharClass::Space,
            _ => CharClass::Other,
        }
    }

    /// `\pL`
    #[inline]
    pub fn is_letter(self) -> bool {
        self == CharClass::Letter
    }

    /// `\pL|\pM`
    #[inline]
    pub fn is_letter_or_mark(self) -> bool {
        matches!(self, CharClass::Letter | CharClass::Mark)
    }

    /// `\pL|\d`
    #[inline]
    pub fn is_letter_or_digit(self) -> bool {
        matches!(self, CharClass::Letter | CharClass::Digit)
    }

    /// `\pL|\pM|\d`
    #[inline]
    pub fn is_alphanumeric(self) -> bool {
        matches!(self, CharClass::Letter | CharClass::Mark | CharClass::Digit)
    }

    /// `\s`
    #[inline]
    pub fn is_space(self) -> bool {
        self == CharClass::Space
    }
}

/// A fragment decoded into characters with their classes
#[derive(Debug, Clone)]
pub struct ClassifiedText {
    chars: Vec<char>,
    classes: Vec<CharClass>,
}

impl ClassifiedText {
    /// Decode and classify a fragment
    pub fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let classes = chars.iter().map(|&ch| CharClass::of(ch)).collect();
        Self { chars, classes }
    }

    /// Number of characters
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the fragment is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Character at `index`
    #[inline]
    pub fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    /// Class at `index`
    #[inline]
    pub fn class_at(&self, index: usize) -> Option<CharClass> {
        self.classes.get(index).copied()
    }

    /// Positions of `target` in the fragment
    pub fn positions(&self, target: char) -> impl Iterator<Item = usize> + '_ {
        self.chars
            .iter()
            .enumerate()
            .filter_map(move |(i, &ch)| (ch == target).then_some(i))
    }

    /// Exclusive end of the non-space run starting at `start`
    pub fn run_end(&self, start: usize) -> usize {
        let mut end = start;
        while end < self.len() && !self.classes[end].is_space() {
            end += 1;
        }
        end
    }

    /// Start of the non-space run ending just before `end`
    pub fn run_start(&self, end: usize) -> usize {
        let mut start = end;
        while start > 0 && !self.classes[start - 1].is_space() {
            start -= 1;
        }
        start
    }

    /// Whether any class in `range` satisfies `pred`
    pub fn any_in(&self, range: std::ops::Range<usize>, pred: impl Fn(CharClass) -> bool) -> bool {
        self.classes[range].iter().any(|&class| pred(class))
    }
}
