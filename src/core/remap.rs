//! Interval remapping
//!
//! The core algorithm: decomposing one interval against one stage into
//! translated overlap fragments and pass-through identity fragments,
//! without ever enumerating individual values.

use crate::core::interval::{Interval, IntervalSet};
use crate::core::stage::MappingStage;

/// Map one interval through one stage, producing the set of all images.
///
/// For every rule intersecting `src`, the overlap is translated by the
/// rule's offset and collected. Whatever part of `src` no rule covers is
/// appended unchanged; those identity fragments are tested against the
/// next stage's rules on the following pipeline iteration.
///
/// With pairwise-disjoint rules the result covers exactly as many values
/// as `src` does, possibly split into up to `2 * rule_count + 1` fragments.
///
/// # Examples
/// ```
/// use interval_remap::{remap_interval, Interval, MappingRule, MappingStage};
/// let stage = MappingStage::new(
///     "seed-to-soil",
///     vec![
///         MappingRule::new(98, 50, 2).unwrap(),
///         MappingRule::new(50, 52, 48).unwrap(),
///     ],
/// )
/// .unwrap();
/// let images = remap_interval(Interval::new(79, 92), &stage);
/// assert_eq!(images.as_slice(), &[Interval::new(81, 94)]);
/// ```
pub fn remap_interval(src: Interval, stage: &MappingStage) -> IntervalSet {
    let mut images = IntervalSet::new();
    let mut covered: Vec<Interval> = Vec::new();

    for rule in stage.overlapping(src) {
        if let Some(region) = src.overlap(rule.source_range()) {
            images.push(rule.translate(region));
            covered.push(region);
        }
    }

    images.extend(filter_uncovered(src, &covered));
    images
}

/// The portions of `src` not covered by any of the given regions.
///
/// Starts from `src` whole and narrows the surviving fragments against one
/// covered region at a time. Fragments never leave `src`: a region disjoint
/// from a fragment leaves that fragment untouched rather than contributing
/// anything of its own, so already-translated regions cannot leak back in
/// as identity fragments.
fn filter_uncovered(src: Interval, covered: &[Interval]) -> Vec<Interval> {
    let mut remaining = vec![src];
    for region in covered {
        let mut narrowed = Vec::with_capacity(remaining.len() + 1);
        for fragment in remaining {
            narrowed.extend(fragment.difference(*region));
        }
        remaining = narrowed;
    }
    remaining
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::stage::MappingRule;

    fn stage(rules: &[(u64, u64, u64)]) -> MappingStage {
        let rules = rules
            .iter()
            .map(|&(src, dest, len)| MappingRule::new(src, dest, len).unwrap())
            .collect();
        MappingStage::new("test", rules).unwrap()
    }

    #[test]
    fn test_fully_covered_single_rule() {
        // seed-to-soil from the canonical sample
        let stage = stage(&[(98, 50, 2), (50, 52, 48)]);
        let images = remap_interval(Interval::new(79, 92), &stage);
        assert_eq!(images.as_slice(), &[Interval::new(81, 94)]);

        let images = remap_interval(Interval::new(55, 67), &stage);
        assert_eq!(images.as_slice(), &[Interval::new(57, 69)]);
    }

    #[test]
    fn test_fully_uncovered_passes_through() {
        let stage = stage(&[(98, 50, 2), (50, 52, 48)]);
        let images = remap_interval(Interval::new(0, 49), &stage);
        assert_eq!(images.as_slice(), &[Interval::new(0, 49)]);
    }

    #[test]
    fn test_straddling_rule_boundary() {
        // [40, 60] against source range [50, 97] offset +2:
        // [50, 60] translates to [52, 62], [40, 49] passes through.
        let stage = stage(&[(50, 52, 48)]);
        let images = remap_interval(Interval::new(40, 60), &stage);
        assert_eq!(images.sorted_pairs(), vec![(40, 49), (52, 62)]);
        assert_eq!(images.total_len(), 21);
    }

    #[test]
    fn test_spanning_multiple_rules() {
        // [45, 99] hits both rules and leaves [45, 49] uncovered.
        let stage = stage(&[(98, 50, 2), (50, 52, 48)]);
        let images = remap_interval(Interval::new(45, 99), &stage);
        assert_eq!(
            images.sorted_pairs(),
            vec![(45, 49), (50, 51), (52, 99)]
        );
        assert_eq!(images.total_len(), 55);
    }

    #[test]
    fn test_identity_stage_returns_src_unchanged() {
        let stage = MappingStage::identity("noop");
        let src = Interval::new(13, 7000);
        let images = remap_interval(src, &stage);
        assert_eq!(images.as_slice(), &[src]);
    }

    #[test]
    fn test_disjoint_covered_regions_no_double_count() {
        // Two interior rules split [0, 10] into three identity fragments.
        // The filter must not re-emit the covered regions when a surviving
        // fragment no longer touches a later region.
        let stage = stage(&[(2, 102, 2), (6, 206, 2)]);
        let images = remap_interval(Interval::new(0, 10), &stage);
        assert_eq!(
            images.sorted_pairs(),
            vec![(0, 1), (4, 5), (8, 10), (102, 103), (206, 207)]
        );
        assert_eq!(images.total_len(), 11);
    }

    #[test]
    fn test_grazing_boundaries_conserve_length() {
        // Rules touching each other and the source endpoints.
        let stage = stage(&[(0, 100, 5), (5, 200, 5)]);
        let images = remap_interval(Interval::new(0, 9), &stage);
        assert_eq!(images.total_len(), 10);
        assert_eq!(images.sorted_pairs(), vec![(100, 104), (200, 204)]);
    }

    #[test]
    fn test_single_point_interval() {
        let stage = stage(&[(50, 52, 48)]);
        assert_eq!(
            remap_interval(Interval::point(50), &stage).as_slice(),
            &[Interval::point(52)]
        );
        assert_eq!(
            remap_interval(Interval::point(49), &stage).as_slice(),
            &[Interval::point(49)]
        );
    }

    #[test]
    fn test_filter_uncovered_narrowing() {
        let src = Interval::new(0, 10);
        let covered = [Interval::new(2, 3), Interval::new(6, 7)];
        assert_eq!(
            filter_uncovered(src, &covered),
            vec![Interval::new(0, 1), Interval::new(4, 5), Interval::new(8, 10)]
        );
    }

    #[test]
    fn test_filter_uncovered_nothing_covered() {
        let src = Interval::new(5, 9);
        assert_eq!(filter_uncovered(src, &[]), vec![src]);
    }
}
