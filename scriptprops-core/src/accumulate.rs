//! Mergeable accumulators
//!
//! Every accumulator in this crate counts additively: recording fragments
//! into separate instances and combining them gives the same counts as
//! recording everything into one. That lets large corpora be split across
//! workers and reduced before a single finalization pass.

/// An accumulator with an identity element and an associative merge
pub trait Accumulate: Sized {
    /// The empty accumulator
    ///
    /// Must satisfy: `a.combine(&Self::identity())` leaves `a` unchanged.
    fn identity() -> Self;

    /// Add the counts of `other` into `self`
    ///
    /// Must be associative. Only raw counts are merged; derived conclusions
    /// are recomputed by the caller's finalization.
    fn combine(&mut self, other: &Self);

    /// Reduce a sequence of partial accumulators into one
    fn reduce<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let mut iter = iter.into_iter();
        let Some(mut acc) = iter.next() else {
            return Self::identity();
        };
        for item in iter {
            acc.combine(&item);
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Sum(u64);

    impl Accumulate for Sum {
        fn identity() -> Self {
            Sum(0)
        }

        fn combine(&mut self, other: &Self) {
            self.0 += other.0;
        }
    }

    #[test]
    fn test_reduce_empty_is_identity() {
        assert_eq!(Sum::reduce(Vec::new()), Sum(0));
    }

    #[test]
    fn test_reduce_sums() {
        assert_eq!(Sum::reduce(vec![Sum(1), Sum(2), Sum(3)]), Sum(6));
    }

    #[test]
    fn test_identity_law() {
        let mut a = Sum(7);
        a.combine(&Sum::identity());
        assert_eq!(a, Sum(7));
    }
}
