//! Property tests: accumulated counts do not depend on how a corpus is split

use proptest::prelude::*;
use scriptprops_core::{Accumulate, DirectionClassifier, NumberStyleInferrer, QuotationStyleInferrer};

fn fragment() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,.?!'’‘“”„«»‹›ʼאבגابج\u{0301}\n]{0,40}"
}

fn fed<T: Accumulate>(fragments: &[String], mut record: impl FnMut(&mut T, &str)) -> T {
    let mut acc = T::identity();
    for fragment in fragments {
        record(&mut acc, fragment);
    }
    acc
}

proptest! {
    #[test]
    fn direction_counts_concatenate(a in fragment(), b in fragment()) {
        let mut whole = DirectionClassifier::new();
        whole.record(&format!("{a}{b}"));

        let mut split = DirectionClassifier::new();
        split.record(&a);
        split.record(&b);

        prop_assert_eq!(whole.bidi_counts(), split.bidi_counts());
    }

    #[test]
    fn strong_buckets_bounded_by_total(text in fragment()) {
        let mut classifier = DirectionClassifier::new();
        classifier.record(&text);
        let (ltr, rtl) = classifier.direction_counts();
        prop_assert!(ltr + rtl <= classifier.bidi_counts().total());
    }

    #[test]
    fn quotation_counts_merge_across_workers(
        fragments in prop::collection::vec(fragment(), 0..12),
        split in any::<prop::sample::Index>(),
    ) {
        let at = split.index(fragments.len() + 1);
        let record = |q: &mut QuotationStyleInferrer, s: &str| q.record(s);

        let mut sequential: QuotationStyleInferrer = fed(&fragments, record);
        let mut merged: QuotationStyleInferrer = fed(&fragments[..at], record);
        merged.combine(&fed(&fragments[at..], record));

        prop_assert_eq!(sequential.total_chars_seen(), merged.total_chars_seen());
        prop_assert_eq!(sequential.finalize().to_vec(), merged.finalize().to_vec());
        prop_assert_eq!(sequential.report(), merged.report());
    }

    #[test]
    fn number_counts_merge_across_workers(
        fragments in prop::collection::vec(fragment(), 0..12),
        split in any::<prop::sample::Index>(),
    ) {
        let at = split.index(fragments.len() + 1);
        let record = |n: &mut NumberStyleInferrer, s: &str| n.record(s);

        let sequential: NumberStyleInferrer = fed(&fragments, record);
        let mut merged: NumberStyleInferrer = fed(&fragments[..at], record);
        merged.combine(&fed(&fragments[at..], record));

        prop_assert_eq!(
            sequential.report().pattern_counts,
            merged.report().pattern_counts
        );
    }

    #[test]
    fn finalize_is_idempotent(fragments in prop::collection::vec(fragment(), 0..8)) {
        let mut inferrer: QuotationStyleInferrer =
            fed(&fragments, |q: &mut QuotationStyleInferrer, s: &str| q.record(s));
        let first = inferrer.finalize().to_vec();
        let second = inferrer.finalize().to_vec();
        prop_assert_eq!(first, second);
    }
}
