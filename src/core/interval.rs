//! Closed-interval arithmetic
//!
//! The atomic unit of the engine: a closed integer range `[start, end]`
//! together with the overlap/difference operations the remapper is built on.
//! An empty interval has no representation of its own; operations that may
//! produce one return `Option<Interval>` or omit it from their output.

use std::fmt;

/// A closed integer range `[start, end]`.
///
/// Invariant: `start <= end`. Constructed intervals are immutable; splitting
/// an interval produces new ones rather than mutating in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interval {
    /// First value covered (inclusive)
    pub start: u64,
    /// Last value covered (inclusive)
    pub end: u64,
}

impl Interval {
    /// Create an interval from inclusive endpoints.
    ///
    /// # Panics
    /// Debug builds panic if `start > end`.
    pub fn new(start: u64, end: u64) -> Self {
        debug_assert!(start <= end, "interval start {} > end {}", start, end);
        Self { start, end }
    }

    /// Single-value interval `[v, v]`.
    pub fn point(v: u64) -> Self {
        Self { start: v, end: v }
    }

    /// Create an interval from a `(start, length)` pair.
    ///
    /// Returns `None` for a zero length or when `start + length` does not
    /// fit in `u64`. The exclusive end staying representable is what lets
    /// downstream index queries use `end + 1` without overflow checks.
    ///
    /// # Examples
    /// ```
    /// use interval_remap::Interval;
    /// assert_eq!(Interval::from_start_len(2, 3), Some(Interval::new(2, 4)));
    /// assert_eq!(Interval::from_start_len(2, 0), None);
    /// assert_eq!(Interval::from_start_len(u64::MAX, 2), None);
    /// ```
    pub fn from_start_len(start: u64, length: u64) -> Option<Self> {
        if length == 0 {
            return None;
        }
        start.checked_add(length - 1).map(|end| Self { start, end })
    }

    /// Number of values covered.
    ///
    /// Saturates for the full-domain interval `[0, u64::MAX]`, which cannot
    /// arise from `from_start_len`-constructed data.
    pub fn len(&self) -> u64 {
        (self.end - self.start).saturating_add(1)
    }

    /// Whether the interval covers `v`.
    pub fn contains(&self, v: u64) -> bool {
        self.start <= v && v <= self.end
    }

    /// Intersection of two intervals.
    ///
    /// Symmetric in its arguments; `None` when the intervals are disjoint.
    ///
    /// # Examples
    /// ```
    /// use interval_remap::Interval;
    /// let a = Interval::new(0, 10);
    /// let b = Interval::new(8, 20);
    /// assert_eq!(a.overlap(b), Some(Interval::new(8, 10)));
    /// assert_eq!(a.overlap(Interval::new(11, 20)), None);
    /// ```
    pub fn overlap(self, other: Interval) -> Option<Interval> {
        if self.start <= other.end && other.start <= self.end {
            Some(Interval::new(
                self.start.max(other.start),
                self.end.min(other.end),
            ))
        } else {
            None
        }
    }

    /// The portions of `self` lying strictly outside `other`.
    ///
    /// Yields 0, 1 or 2 fragments: one on each side of `other` that `self`
    /// extends past. Disjoint inputs return `self` whole. Every fragment is
    /// contained in `self`, so repeated application only ever narrows.
    ///
    /// # Examples
    /// ```
    /// use interval_remap::Interval;
    /// let a = Interval::new(0, 10);
    /// assert_eq!(
    ///     a.difference(Interval::new(3, 6)),
    ///     vec![Interval::new(0, 2), Interval::new(7, 10)]
    /// );
    /// assert_eq!(a.difference(Interval::new(0, 20)), vec![]);
    /// assert_eq!(a.difference(Interval::new(30, 40)), vec![a]);
    /// ```
    pub fn difference(self, other: Interval) -> Vec<Interval> {
        if self.overlap(other).is_none() {
            return vec![self];
        }

        let mut fragments = Vec::with_capacity(2);
        if self.start < other.start {
            // other.start >= 1 here, the subtraction cannot underflow
            fragments.push(Interval::new(self.start, other.start - 1));
        }
        if self.end > other.end {
            fragments.push(Interval::new(other.end + 1, self.end));
        }
        fragments
    }

    /// Symmetric-difference decomposition: `a \ b` followed by `b \ a`.
    ///
    /// Together with [`Interval::overlap`] this exactly covers `a ∪ b` with
    /// no value counted twice. For disjoint inputs both intervals are
    /// returned unchanged.
    pub fn symmetric_difference(a: Interval, b: Interval) -> Vec<Interval> {
        let mut fragments = a.difference(b);
        fragments.extend(b.difference(a));
        fragments
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// A collection of intervals representing all currently possible values.
///
/// Order is irrelevant and members may overlap; merging is an optimization
/// the engine never relies on. Only the final minimum extraction inspects
/// every member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntervalSet {
    intervals: Vec<Interval>,
}

impl IntervalSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of member intervals (not covered values).
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn push(&mut self, interval: Interval) {
        self.intervals.push(interval);
    }

    pub fn extend<I: IntoIterator<Item = Interval>>(&mut self, intervals: I) {
        self.intervals.extend(intervals);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.intervals.iter()
    }

    pub fn as_slice(&self) -> &[Interval] {
        &self.intervals
    }

    /// Smallest `start` across all members, `None` for an empty set.
    pub fn min_start(&self) -> Option<u64> {
        self.intervals.iter().map(|iv| iv.start).min()
    }

    /// Total number of covered values, counting overlaps with multiplicity.
    ///
    /// Widened to `u128` so sums over many large intervals cannot wrap.
    pub fn total_len(&self) -> u128 {
        self.intervals.iter().map(|iv| iv.len() as u128).sum()
    }

    /// Members as a sorted `(start, end)` multiset, for order-insensitive
    /// comparison of two runs.
    pub fn sorted_pairs(&self) -> Vec<(u64, u64)> {
        let mut pairs: Vec<(u64, u64)> = self
            .intervals
            .iter()
            .map(|iv| (iv.start, iv.end))
            .collect();
        pairs.sort_unstable();
        pairs
    }
}

impl From<Vec<Interval>> for IntervalSet {
    fn from(intervals: Vec<Interval>) -> Self {
        Self { intervals }
    }
}

impl FromIterator<Interval> for IntervalSet {
    fn from_iter<I: IntoIterator<Item = Interval>>(iter: I) -> Self {
        Self {
            intervals: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for IntervalSet {
    type Item = Interval;
    type IntoIter = std::vec::IntoIter<Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.into_iter()
    }
}

impl<'a> IntoIterator for &'a IntervalSet {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}
