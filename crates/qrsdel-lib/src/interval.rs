use num_traits::{One, Zero};
use serde::Serialize;
use std::fmt;
use std::ops::{Add, Sub};

/// Closed interval `[start, end]` over an ordered scalar.
///
/// Ordering is lexicographic on `(start, end)`. An interval with
/// `start == end` is considered empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Interval<T> {
    start: T,
    end: T,
}

impl<T: Copy + PartialOrd> Interval<T> {
    /// Builds a new interval.
    ///
    /// # Panics
    /// If `start > end`.
    pub fn new(start: T, end: T) -> Self {
        assert!(start <= end, "interval start must not be greater than end");
        Self { start, end }
    }

    /// Builds a new interval, or `None` if `start > end`.
    pub fn try_new(start: T, end: T) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn start(&self) -> T {
        self.start
    }

    pub fn end(&self) -> T {
        self.end
    }

    fn ordered<'a>(&'a self, other: &'a Self) -> (&'a Self, &'a Self) {
        if self.is_after(other) {
            (other, self)
        } else {
            (self, other)
        }
    }

    fn is_after(&self, other: &Self) -> bool {
        self.start > other.start || (self.start == other.start && self.end > other.end)
    }

    /// Intersection of both intervals. Disjoint intervals yield an empty
    /// interval placed at the start of the earlier one.
    pub fn intersection(&self, other: &Self) -> Self {
        let (first, second) = self.ordered(other);
        if first.end <= second.start {
            return Self::new(first.start, first.start);
        }
        let end = if first.end < second.end {
            first.end
        } else {
            second.end
        };
        Self::new(second.start, end)
    }

    /// Smallest interval containing both.
    pub fn hull(&self, other: &Self) -> Self {
        let (first, second) = self.ordered(other);
        let end = if first.end > second.end {
            first.end
        } else {
            second.end
        };
        Self::new(first.start, end)
    }

    /// True iff both intervals share more than a single boundary point.
    pub fn overlap(&self, other: &Self) -> bool {
        let (first, second) = self.ordered(other);
        first.end > second.start
    }

    /// True iff both intervals overlap or meet.
    pub fn overlapm(&self, other: &Self) -> bool {
        let (first, second) = self.ordered(other);
        first.end >= second.start
    }

    pub fn contains(&self, item: T) -> bool {
        self.start <= item && item <= self.end
    }

    pub fn subset(&self, other: &Self) -> bool {
        self.start >= other.start && self.end <= other.end
    }

    pub fn proper_subset(&self, other: &Self) -> bool {
        self.start > other.start && self.end < other.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl<T> Interval<T>
where
    T: Copy + PartialOrd + Add<Output = T> + Sub<Output = T> + Zero + One,
{
    /// Interval displaced by `offset` on both ends.
    pub fn translate(&self, offset: T) -> Self {
        Self::new(self.start + offset, self.end + offset)
    }

    pub fn length(&self) -> T {
        self.end - self.start
    }

    pub fn is_singleton(&self) -> bool {
        self.length() == T::one()
    }

    /// Distance between both intervals, zero if they overlap.
    pub fn separation(&self, other: &Self) -> T {
        let (first, second) = self.ordered(other);
        if first.end > second.start {
            T::zero()
        } else {
            second.start - first.end
        }
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(a: i64, b: i64) -> Interval<i64> {
        Interval::new(a, b)
    }

    #[test]
    fn hull_takes_outer_bounds() {
        let pairs = [(iv(0, 5), iv(3, 10)), (iv(4, 6), iv(-2, 1)), (iv(1, 9), iv(2, 3))];
        for (a, b) in pairs {
            let h = a.hull(&b);
            assert_eq!(h.start(), a.start().min(b.start()));
            assert_eq!(h.end(), a.end().max(b.end()));
            assert_eq!(h, b.hull(&a));
        }
    }

    #[test]
    fn intersection_empty_iff_disjoint() {
        let pairs = [
            (iv(0, 5), iv(3, 10)),
            (iv(0, 5), iv(5, 10)),
            (iv(0, 5), iv(7, 10)),
            (iv(2, 8), iv(3, 4)),
            (iv(10, 12), iv(0, 11)),
        ];
        for (a, b) in pairs {
            assert_eq!(a.intersection(&b).is_empty(), !a.overlap(&b), "{a} {b}");
        }
        assert_eq!(iv(0, 5).intersection(&iv(3, 10)), iv(3, 5));
        assert_eq!(iv(2, 8).intersection(&iv(3, 4)), iv(3, 4));
    }

    #[test]
    fn translate_shifts_both_ends() {
        let a = iv(3, 7);
        for k in [-3, 0, 12] {
            let moved = a.translate(k);
            assert_eq!(moved.start(), a.start() + k);
            assert_eq!(moved.end(), a.end() + k);
            assert_eq!(moved.length(), a.length());
        }
    }

    #[test]
    fn overlap_and_meet() {
        assert!(!iv(0, 5).overlap(&iv(5, 8)));
        assert!(iv(0, 5).overlapm(&iv(5, 8)));
        assert!(!iv(0, 4).overlapm(&iv(5, 8)));
        assert_eq!(iv(0, 4).separation(&iv(7, 8)), 3);
        assert_eq!(iv(0, 6).separation(&iv(5, 8)), 0);
    }

    #[test]
    fn ordering_is_lexicographic() {
        let mut v = vec![iv(3, 4), iv(1, 9), iv(1, 2), iv(0, 10)];
        v.sort();
        assert_eq!(v, vec![iv(0, 10), iv(1, 2), iv(1, 9), iv(3, 4)]);
    }

    #[test]
    fn predicates() {
        let a = iv(2, 6);
        assert!(a.contains(2) && a.contains(6) && !a.contains(7));
        assert!(iv(3, 4).proper_subset(&a));
        assert!(iv(2, 4).subset(&a) && !iv(2, 4).proper_subset(&a));
        assert!(iv(4, 5).is_singleton() && !a.is_singleton());
        assert!(iv(3, 3).is_empty());
        assert_eq!(Interval::try_new(5, 1), None);
    }
}
