//! Mapping rules and stages
//!
//! A stage is one step of the pipeline: an ordered set of rules, each
//! translating a contiguous source range by a fixed offset. Values not
//! covered by any rule map to themselves. Rule source ranges are indexed
//! with rust-lapper so both the pointwise lookup and the remapper's
//! overlapping-rule query stay fast when stages carry many rules.

use crate::core::error::EngineError;
use crate::core::interval::Interval;
use rust_lapper::{Interval as RuleSpan, Lapper};

/// One `(source_start, dest_start, length)` mapping rule.
///
/// Defines the source range `[source_start, source_start + length - 1]` and
/// the fixed offset `dest_start - source_start` applied to values inside it.
/// Immutable once constructed; owned exclusively by its stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingRule {
    source_start: u64,
    dest_start: u64,
    length: u64,
}

impl MappingRule {
    /// Create a rule, validating that both the source and destination
    /// ranges are non-empty and have representable exclusive ends.
    ///
    /// Rejecting `start + length > u64::MAX` here is what allows every
    /// later translation and index query to use plain unsigned arithmetic.
    pub fn new(source_start: u64, dest_start: u64, length: u64) -> Result<Self, EngineError> {
        let valid = length > 0
            && source_start.checked_add(length).is_some()
            && dest_start.checked_add(length).is_some();
        if !valid {
            return Err(EngineError::InvalidRule {
                source_start,
                dest_start,
                length,
            });
        }
        Ok(Self {
            source_start,
            dest_start,
            length,
        })
    }

    pub fn source_start(&self) -> u64 {
        self.source_start
    }

    pub fn dest_start(&self) -> u64 {
        self.dest_start
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    /// The source range covered by this rule.
    pub fn source_range(&self) -> Interval {
        Interval::new(self.source_start, self.source_start + self.length - 1)
    }

    /// The destination range this rule maps into.
    pub fn dest_range(&self) -> Interval {
        Interval::new(self.dest_start, self.dest_start + self.length - 1)
    }

    /// The signed translation applied to covered values.
    pub fn offset(&self) -> i128 {
        self.dest_start as i128 - self.source_start as i128
    }

    /// Whether `v` falls inside the source range.
    pub fn covers(&self, v: u64) -> bool {
        self.source_range().contains(v)
    }

    /// Translate a single covered value.
    ///
    /// Caller guarantees `self.covers(v)`.
    pub fn apply(&self, v: u64) -> u64 {
        debug_assert!(self.covers(v));
        self.dest_start + (v - self.source_start)
    }

    /// Translate a sub-range of the source range into destination space.
    ///
    /// Caller guarantees `span` is contained in [`MappingRule::source_range`];
    /// the remapper only ever passes overlaps computed against it.
    pub fn translate(&self, span: Interval) -> Interval {
        debug_assert!(self.covers(span.start) && self.covers(span.end));
        Interval::new(
            self.dest_start + (span.start - self.source_start),
            self.dest_start + (span.end - self.source_start),
        )
    }
}

/// One pipeline step: an ordered collection of mapping rules with
/// pairwise-disjoint source ranges.
///
/// Construction validates disjointness and fails fast on violation; any
/// value not covered by a rule passes through the stage unchanged.
pub struct MappingStage {
    name: String,
    rules: Vec<MappingRule>,
    index: Lapper<u64, usize>,
}

impl MappingStage {
    /// Build a stage from its rules.
    ///
    /// Returns [`EngineError::OverlappingRules`] if any two rule source
    /// ranges intersect.
    pub fn new(name: impl Into<String>, rules: Vec<MappingRule>) -> Result<Self, EngineError> {
        let name = name.into();

        // Sort by source start once; any overlap shows up between neighbors.
        let mut by_start: Vec<(u64, u64)> = rules
            .iter()
            .map(|r| (r.source_start, r.source_start + r.length))
            .collect();
        by_start.sort_unstable();
        for pair in by_start.windows(2) {
            let (prev_start, prev_stop) = pair[0];
            let (next_start, _) = pair[1];
            if next_start < prev_stop {
                return Err(EngineError::OverlappingRules {
                    stage: name,
                    first: prev_start,
                    second: next_start,
                });
            }
        }

        let spans: Vec<RuleSpan<u64, usize>> = rules
            .iter()
            .enumerate()
            .map(|(idx, r)| RuleSpan {
                start: r.source_start,
                stop: r.source_start + r.length,
                val: idx,
            })
            .collect();

        Ok(Self {
            name,
            rules,
            index: Lapper::new(spans),
        })
    }

    /// A stage with no rules: the identity function over the integers.
    pub fn identity(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
            index: Lapper::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[MappingRule] {
        &self.rules
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Rules whose source range intersects `span`.
    ///
    /// The index stores half-open ranges with validated exclusive ends, so
    /// the saturated `end + 1` query bound is exact even at `u64::MAX`.
    pub fn overlapping(&self, span: Interval) -> impl Iterator<Item = &MappingRule> {
        self.index
            .find(span.start, span.end.saturating_add(1))
            .map(move |entry| &self.rules[entry.val])
    }

    /// Single-value lookup through this stage.
    ///
    /// Returns the translated value for the rule covering `v`, or `v`
    /// itself when no rule applies. This is the pointwise oracle the
    /// interval algorithm is tested against.
    ///
    /// # Examples
    /// ```
    /// use interval_remap::{MappingRule, MappingStage};
    /// let stage = MappingStage::new(
    ///     "seed-to-soil",
    ///     vec![
    ///         MappingRule::new(98, 50, 2).unwrap(),
    ///         MappingRule::new(50, 52, 48).unwrap(),
    ///     ],
    /// )
    /// .unwrap();
    /// assert_eq!(stage.lookup(79), 81);
    /// assert_eq!(stage.lookup(99), 51);
    /// assert_eq!(stage.lookup(10), 10);
    /// ```
    pub fn lookup(&self, v: u64) -> u64 {
        self.overlapping(Interval::point(v))
            .next()
            .map(|rule| rule.apply(v))
            .unwrap_or(v)
    }
}

impl std::fmt::Debug for MappingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappingStage")
            .field("name", &self.name)
            .field("rules", &self.rules)
            .finish()
    }
}
