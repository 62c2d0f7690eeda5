use scriptprops_core::{Analyzer, Input, QuotationStyleInferrer};
use std::io::Cursor;

fn analyze_lines(line: &str, times: usize) -> scriptprops_core::AnalysisResult {
    let corpus = line.repeat(times);
    Analyzer::new()
        .analyze(Input::from_reader(Cursor::new(corpus.into_bytes())))
        .unwrap()
}

#[test]
fn test_english_double_quotes_over_many_lines() {
    let result = analyze_lines("He said “word” today.\n", 100);

    assert!(result.confirms('“', '”'));
    assert!(!result.confirms('“', '“'));
    assert!(!result.confirms('”', '”'));

    let counts = &result.quotation_style.positional_counts;
    for &(open, close) in result.confirmed_pairs() {
        assert!(counts[&open].total > 0, "{open} never occurs");
        assert!(counts[&close].total > 0, "{close} never occurs");
    }
    assert_eq!(result.quotation_style.pair_counts[&'“'][&'”'], 100);
}

#[test]
fn test_same_character_on_both_sides() {
    let result = analyze_lines("He said ”word” today.\n", 10);

    let closer = result.quotation_style.positional_counts[&'”'];
    assert_eq!(closer.start, 10);
    assert_eq!(closer.end, 10);
    assert_eq!(closer.total, 20);
    assert!(result.confirms('”', '”'));
    assert!(result.quotation_style.pair_counts.is_empty());
}

#[test]
fn test_apostrophes_do_not_masquerade_as_quotes() {
    let result = analyze_lines("She said ‘I don’t know’ and left.\n", 10);

    let closer = result.quotation_style.positional_counts[&'’'];
    assert_eq!(closer.total, 20);
    assert_eq!(closer.mid_word, 10);
    assert_eq!(closer.extended_end, 10);

    assert!(result.confirms('‘', '’'));
    assert!(!result.confirms('’', '’'));
}

#[test]
fn test_guillemets_with_spacing() {
    let result = analyze_lines("Il a dit « bonjour » puis il est parti.\n", 20);
    assert!(result.confirms('«', '»'));
    assert_eq!(result.quotation_style.pair_counts[&'«'][&'»'], 20);
}

#[test]
fn test_no_candidates_means_no_pairs() {
    let result = analyze_lines("Nothing quoted here at all.\n", 50);
    assert!(result.confirmed_pairs().is_empty());
    assert!(result.quotation_style.positional_counts.is_empty());
    assert!(result.quotation_style.pair_counts.is_empty());
}

#[test]
fn test_repeated_finalize_is_stable() {
    let mut inferrer = QuotationStyleInferrer::default();
    for _ in 0..5 {
        inferrer.record("„Guten Tag“, sagte er.");
    }
    let first = inferrer.finalize().to_vec();
    let second = inferrer.finalize().to_vec();
    assert_eq!(first, second);
    assert!(first.contains(&('„', '“')));
}
