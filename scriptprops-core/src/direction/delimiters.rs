//! Open/close delimiter switching for right-to-left text
//!
//! Writers embedding curly quotes in right-to-left text frequently encode
//! the glyphs in reversed roles. For strings that classify as right-to-left,
//! each opener is exchanged with its closer.

use super::classifier::{string_direction, Direction};

/// Visually symmetric delimiter pairs eligible for switching
pub const SWITCHABLE_RTL_DELIMITERS: [(char, char); 2] = [('“', '”'), ('‘', '’')];

/// Whether `text` contains any delimiter from `pairs`
pub fn contains_switchable(text: &str, pairs: &[(char, char)]) -> bool {
    text.chars()
        .any(|ch| pairs.iter().any(|&(open, close)| ch == open || ch == close))
}

/// Swap each opener with its closer if `text` itself reads right-to-left
///
/// The direction is classified on `text` alone, not on any corpus state.
/// Output is built in one mapping pass, so every other character, whatever
/// its code point, is preserved unchanged.
pub fn switch_open_close_for_rtl(text: &str, pairs: &[(char, char)]) -> String {
    if string_direction(text) != Direction::RightToLeft {
        return text.to_string();
    }
    text.chars().map(|ch| switch_char(ch, pairs)).collect()
}

fn switch_char(ch: char, pairs: &[(char, char)]) -> char {
    for &(open, close) in pairs {
        if ch == open {
            return close;
        }
        if ch == close {
            return open;
        }
    }
    ch
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switches_rtl_text() {
        let text = "”שלום“ ’עולם‘";
        let switched = switch_open_close_for_rtl(text, &SWITCHABLE_RTL_DELIMITERS);
        assert_eq!(switched, "“שלום” ‘עולם’");
    }

    #[test]
    fn test_round_trip_restores_original() {
        let text = "قال: ”مرحبا“ و’سلام‘";
        let once = switch_open_close_for_rtl(text, &SWITCHABLE_RTL_DELIMITERS);
        assert_ne!(once, text);
        let twice = switch_open_close_for_rtl(&once, &SWITCHABLE_RTL_DELIMITERS);
        assert_eq!(twice, text);
    }

    #[test]
    fn test_ltr_text_unchanged() {
        let text = "She said “hello”.";
        assert_eq!(
            switch_open_close_for_rtl(text, &SWITCHABLE_RTL_DELIMITERS),
            text
        );
    }

    #[test]
    fn test_private_use_sentinel_preserved() {
        let text = "\u{0091}”שלום“";
        let switched = switch_open_close_for_rtl(text, &SWITCHABLE_RTL_DELIMITERS);
        assert_eq!(switched, "\u{0091}“שלום”");
    }

    #[test]
    fn test_contains_switchable() {
        assert!(contains_switchable("a ‘b", &SWITCHABLE_RTL_DELIMITERS));
        assert!(!contains_switchable("a \"b\"", &SWITCHABLE_RTL_DELIMITERS));
    }
}
